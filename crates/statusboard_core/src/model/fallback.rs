//! Built-in "no data available" document.
//!
//! # Responsibility
//! - Provide a well-formed `ProjectData` when neither remote nor local data
//!   can be loaded.
//!
//! # Invariants
//! - Every section views index into is present, even if empty
//!   (`recent`, `projectTree.groups`, `ideas`).
//! - Optional live sections (`executionLog`, `progress`, ...) stay absent so
//!   views render zeroed metrics.

use crate::model::project::ProjectData;
use serde_json::{json, Map, Value};
use time::OffsetDateTime;

const FALLBACK_NAME: &str = "OZ – Design-Time Accessibility Assistant";
const FALLBACK_MVP: &str = "Text Field – E2E";
const FALLBACK_REPO: &str = "github.com/haimXseb/xp-map";

impl ProjectData {
    /// Returns the built-in document stamped with today's UTC date.
    pub fn fallback() -> Self {
        Self::fallback_on(today_utc())
    }

    /// Returns the built-in document stamped with the given `YYYY-MM-DD` date.
    pub fn fallback_on(updated: impl Into<String>) -> Self {
        let updated: String = updated.into();
        let sections: [(&str, Value); 10] = [
            (
                "meta",
                json!({
                    "name": FALLBACK_NAME,
                    "updated": updated,
                    "mvp": FALLBACK_MVP,
                    "repo": FALLBACK_REPO,
                }),
            ),
            (
                "truth",
                json!({
                    "note": "Source of truth: Foundations + MVP rule pack. שאר המסמכים תומכים בלבד.",
                    "docs": [
                        {
                            "label": "Foundations – engine logic",
                            "path": "docs/01-foundations/foundations-engine-logic.docx"
                        },
                        { "label": "MVP rule pack", "path": "docs/03-components/mvp-rule-pack.docx" }
                    ]
                }),
            ),
            (
                "pipeline",
                json!([
                    { "id": "select", "title": "בחירה", "detail": "המעצב בוחר נוד ב-Figma" },
                    { "id": "preview", "title": "תצוגה מקדימה", "detail": "PNG בגודל טבעי עם רקע שקוף" },
                    { "id": "type", "title": "זיהוי סוג קומפוננטה", "detail": "חוקים מקומיים עם Gate קשיח" },
                    { "id": "intent", "title": "Intent/Label", "detail": "ברירת מחדל: Unknown. Auto-resolve עד 3 הורים" },
                    { "id": "checks", "title": "בדיקות", "detail": "TF-01…TF-14 (WARN בלבד ב-MVP)" },
                    { "id": "fix", "title": "אוטו-פיקס", "detail": "רק Safe autofixes לפי קריטריונים" },
                    { "id": "handoff", "title": "Handoff", "detail": "פלט מובנה לדיזיין + Dev" }
                ]),
            ),
            (
                "gates",
                json!({
                    "local": { "confidence": 0.85, "structural": 0.35 },
                    "vision": {
                        "enabledByDefault": false,
                        "role": "Boost + sanity check (לא dependency)"
                    }
                }),
            ),
            (
                "build",
                json!({
                    "command": "npm run build",
                    "artifacts": [
                        { "path": "dist/src/code.js", "note": "Main plugin bundle" },
                        { "path": "dist/ui.html", "note": "UI bundle" },
                        { "path": "src/ui-inline.ts", "note": "Generated – לא לערוך" }
                    ]
                }),
            ),
            (
                "storage",
                json!([
                    { "key": "aims.log", "type": "Array<JobLog>", "purpose": "היסטוריית הרצות (UNDO)" },
                    { "key": "ams-settings", "type": "Settings", "purpose": "העדפות משתמש (provider/model/keys)" },
                    { "key": "OPENAI_API_KEY", "type": "string", "purpose": "מפתח AI Vision" }
                ]),
            ),
            (
                "files",
                json!({
                    "mustEdit": [
                        { "path": "src/code.ts", "why": "לוגיקה: orchestrator + detectors + gates" },
                        { "path": "ui/ui.html", "why": "UI + state machine" },
                        { "path": "src/protocol.ts", "why": "פרוטוקול הודעות" }
                    ],
                    "dontEdit": [
                        { "path": "src/ui-inline.ts", "why": "Generated" },
                        { "path": "dist/*", "why": "Build output" }
                    ]
                }),
            ),
            ("recent", json!([])),
            ("projectTree", json!({ "groups": [] })),
            ("ideas", json!({})),
        ];

        let fields: Map<String, Value> = sections
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        Self::from_fields(fields)
    }
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today_utc() -> String {
    let date = OffsetDateTime::now_utc().date();
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

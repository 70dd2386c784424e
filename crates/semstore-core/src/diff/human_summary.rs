//! Human-readable summary renderer for version diffs.

use crate::diff::model::{FieldChanges, VersionDiff};

/// Render a Markdown summary of a [`VersionDiff`].
///
/// Intended for review displays; informational only.
pub fn render_human_summary(diff: &VersionDiff) -> String {
    let mut out = String::new();

    out.push_str("## Version Diff\n\n");

    let s = &diff.summary;
    out.push_str(&format!(
        "**Total changes**: {}  \n**Breaking changes**: {}\n\n\
         | Additions | Modifications | Removals |\n\
         |---|---|---|\n\
         | {} | {} | {} |\n\n",
        s.total_changes, s.breaking_changes, s.additions, s.modifications, s.removals
    ));

    if diff.is_empty() {
        out.push_str("_No semantic changes detected._\n");
        return out;
    }

    if !diff.added.is_empty() {
        out.push_str("### Added\n\n");
        for bo in &diff.added.business_objects {
            out.push_str(&format!("- Business object `{}` ({})\n", bo.id, bo.label));
        }
        for rel in &diff.added.relations {
            out.push_str(&format!(
                "- Relation `{}`: `{}` → `{}`\n",
                rel.id, rel.source_bo_id, rel.target_bo_id
            ));
        }
        out.push('\n');
    }

    if !diff.removed.is_empty() {
        out.push_str("### Removed (breaking)\n\n");
        for bo in &diff.removed.business_objects {
            out.push_str(&format!("- Business object `{}` ({})\n", bo.id, bo.label));
        }
        for rel in &diff.removed.relations {
            out.push_str(&format!(
                "- Relation `{}`: `{}` → `{}`\n",
                rel.id, rel.source_bo_id, rel.target_bo_id
            ));
        }
        out.push('\n');
    }

    if !diff.modified.business_objects.is_empty() {
        out.push_str("### Modified\n\n");
        for entry in &diff.modified.business_objects {
            if entry.before.label != entry.after.label {
                out.push_str(&format!(
                    "- Business object `{}`: label `{}` → `{}`\n",
                    entry.id, entry.before.label, entry.after.label
                ));
            } else {
                out.push_str(&format!("- Business object `{}`\n", entry.id));
            }
            render_field_changes(&mut out, &entry.field_changes);
        }
        out.push('\n');
    }

    out
}

fn render_field_changes(out: &mut String, changes: &FieldChanges) {
    if !changes.added.is_empty() {
        let ids: Vec<&str> = changes.added.iter().map(|f| f.id.as_str()).collect();
        out.push_str(&format!("  - **Added fields**: {}\n", ids.join(", ")));
    }
    if !changes.removed.is_empty() {
        let ids: Vec<&str> = changes.removed.iter().map(|f| f.id.as_str()).collect();
        out.push_str(&format!("  - **Removed fields**: {}\n", ids.join(", ")));
    }
    if !changes.modified.is_empty() {
        let ids: Vec<&str> = changes.modified.iter().map(|m| m.after.id.as_str()).collect();
        out.push_str(&format!("  - **Changed fields**: {}\n", ids.join(", ")));
    }
}

use std::collections::BTreeSet;

use tracing::warn;

use super::domain::RequirementEntry;
use crate::catalog::Catalog;

/// Resolve the ordered, deduplicated document-requirement set for a tag
/// and a service selection.
///
/// Ordering is catalog-driven: the tag's common requirements come first,
/// then each selected service's requirements in master-service-list order.
/// Selection order never influences the output. Duplicate names keep the
/// first occurrence, so a common requirement's `required` flag beats a
/// later service's redefinition of the same name.
pub fn resolve_requirements(
    catalog: &Catalog,
    tag: &str,
    selected: &BTreeSet<String>,
) -> Vec<RequirementEntry> {
    let mut resolved: Vec<RequirementEntry> = Vec::new();

    for entry in catalog.common_requirements(tag) {
        merge_entry(&mut resolved, entry, "common");
    }

    for service in catalog.services() {
        if selected.contains(&service.name) {
            for entry in &service.requirements {
                merge_entry(&mut resolved, entry, &service.name);
            }
        }
    }

    resolved
}

fn merge_entry(resolved: &mut Vec<RequirementEntry>, entry: &RequirementEntry, source: &str) {
    match resolved.iter().find(|kept| kept.name == entry.name) {
        Some(winner) => {
            if winner.required != entry.required {
                // First occurrence wins even when the flags disagree. Loud
                // enough for catalog authors to notice a same-named but
                // different-meaning requirement.
                warn!(
                    requirement = %entry.name,
                    kept_required = winner.required,
                    dropped_required = entry.required,
                    dropped_source = source,
                    "duplicate requirement name resolved first-wins"
                );
            }
        }
        None => resolved.push(entry.clone()),
    }
}

/// Attachment-registry key for a requirement: the bare name for common
/// requirements, `service + "-" + name` for service-specific ones so two
/// services requiring a same-named document stay distinct.
pub fn requirement_key(service: Option<&str>, requirement_name: &str) -> String {
    match service {
        Some(service) => format!("{service}-{requirement_name}"),
        None => requirement_name.to_string(),
    }
}

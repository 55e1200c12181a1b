use std::collections::BTreeSet;

use super::pattern::PatternSet;
use super::request::{GroupDefs, GroupOverlap};
use crate::usage::UsageItem;

/// Collapse grouped items into one synthetic item per group.
///
/// Groups run in the order the request lists them. A group whose patterns match nothing emits no
/// item. Items claimed by no group are kept as-is. The result is sorted by
/// `total_seconds`, largest first; ties keep their relative order.
pub fn group(
    items: &[UsageItem],
    groups: &GroupDefs,
    overlap: GroupOverlap,
) -> Vec<UsageItem> {
    let mut claimed = vec![false; items.len()];
    let mut result: Vec<UsageItem> = Vec::new();

    for (group_name, member_patterns) in groups {
        let rules = PatternSet::from(member_patterns);

        let mut members: Vec<&UsageItem> = Vec::new();
        for (idx, item) in items.iter().enumerate() {
            if !rules.matches(&item.name) {
                continue;
            }
            if overlap == GroupOverlap::FirstWins && claimed[idx] {
                continue;
            }
            claimed[idx] = true;
            members.push(item);
        }

        let Some((first, rest)) = members.split_first() else {
            tracing::debug!(group = %group_name, "group matched no items, skipping");
            continue;
        };

        let mut combined = (*first).clone();
        for member in rest {
            combined = combined.combine(member);
        }
        combined.name = group_name.clone();

        tracing::debug!(
            group = %group_name,
            members = members.len(),
            total_seconds = combined.total_seconds,
            "grouped items"
        );
        result.push(combined);
    }

    let all_patterns: BTreeSet<&String> = groups.values().flatten().collect();
    let ungrouped = PatternSet::new(all_patterns).exclude(items);
    result.extend(ungrouped);

    // sort_by is stable
    result.sort_by(|a, b| b.total_seconds.total_cmp(&a.total_seconds));
    result
}

use std::collections::BTreeMap;

use crate::models::User;

/// Average age of users grouped by the first character of their name
///
/// Keys are taken exactly as stored, so "alice" and "Adam" land in different
/// groups. No users means an empty map.
pub fn average_age_by_initial<'a>(
    users: impl IntoIterator<Item = &'a User>,
) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<char, (u64, u64)> = BTreeMap::new();

    for user in users {
        let Some(initial) = user.initial() else {
            continue;
        };
        let (sum, count) = groups.entry(initial).or_default();
        *sum += u64::from(user.age);
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(initial, (sum, count))| (initial.to_string(), sum as f64 / count as f64))
        .collect()
}

use makelaar_core::{AgentStat, Listing};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Rank agents by listing count and keep the `top_n` largest.
///
/// Listings whose agent name is absent or blank are skipped. The rest are
/// grouped by agent identifier; each group is reported under the name of its
/// first listing. Groups are ordered by descending count, ties broken by
/// ascending name; groups equal on both keep first-seen order. Identifier 0
/// is not special: such listings are only dropped when their name is blank.
///
/// # Examples
///
/// ```
/// use makelaar_core::Listing;
/// use makelaar_stats::top_by_object_count;
///
/// let listings = vec![
///     Listing::new(1, "A"),
///     Listing::new(2, "B"),
///     Listing::new(2, "B"),
/// ];
///
/// let top = top_by_object_count(&listings, 1);
/// assert_eq!(top.len(), 1);
/// assert_eq!(top[0].agent_name(), "B");
/// assert_eq!(*top[0].object_count(), 2);
/// ```
pub fn top_by_object_count<'a, I>(listings: I, top_n: usize) -> Vec<AgentStat>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let mut order: Vec<i64> = Vec::new();
    let mut groups: HashMap<i64, (&'a str, usize)> = HashMap::new();

    for listing in listings {
        let Some(name) = listing.named_agent() else {
            continue;
        };
        let id = *listing.agent_id();
        groups
            .entry(id)
            .and_modify(|(_, count)| *count += 1)
            .or_insert_with(|| {
                order.push(id);
                (name, 1)
            });
    }

    let mut stats: Vec<AgentStat> = order
        .into_iter()
        .filter_map(|id| {
            groups
                .get(&id)
                .map(|(name, count)| AgentStat::new(id, *name, *count))
        })
        .collect();

    // Stable: equal keys stay in first-seen order.
    stats.sort_by(|a, b| {
        (Reverse(a.object_count()), a.agent_name())
            .cmp(&(Reverse(b.object_count()), b.agent_name()))
    });
    stats.truncate(top_n);
    stats
}

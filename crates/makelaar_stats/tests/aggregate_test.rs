//! Tests for ranking agents by listing count.

use makelaar_core::{AgentStat, Listing};
use makelaar_stats::top_by_object_count;

fn listings(records: &[(i64, &str)]) -> Vec<Listing> {
    records
        .iter()
        .map(|(id, name)| Listing::new(*id, *name))
        .collect()
}

#[test]
fn test_ranks_by_count_descending() {
    let records = listings(&[(1, "A"), (1, "A"), (2, "B"), (3, "C"), (3, "C"), (3, "C")]);

    let top = top_by_object_count(&records, 10);

    assert_eq!(
        top,
        vec![
            AgentStat::new(3, "C", 3),
            AgentStat::new(1, "A", 2),
            AgentStat::new(2, "B", 1),
        ]
    );
}

#[test]
fn test_ties_are_broken_alphabetically() {
    let records = listings(&[(5, "Zeeman"), (6, "Aalders"), (7, "Molenaar")]);

    let names: Vec<String> = top_by_object_count(&records, 10)
        .iter()
        .map(|stat| stat.agent_name().clone())
        .collect();

    assert_eq!(names, vec!["Aalders", "Molenaar", "Zeeman"]);
}

#[test]
fn test_empty_names_are_excluded() {
    let records = listings(&[(1, ""), (2, "Valid"), (2, "Valid")]);

    assert_eq!(
        top_by_object_count(&records, 10),
        vec![AgentStat::new(2, "Valid", 2)]
    );
}

#[test]
fn test_absent_and_blank_names_are_excluded() {
    let records = vec![
        Listing::without_agent_name(1),
        Listing::new(2, "   "),
        Listing::new(3, "Drie"),
    ];

    assert_eq!(
        top_by_object_count(&records, 10),
        vec![AgentStat::new(3, "Drie", 1)]
    );
}

#[test]
fn test_truncates_to_top_n() {
    let records = listings(&[(1, "A"), (2, "B"), (2, "B"), (3, "C"), (3, "C"), (3, "C")]);

    let top = top_by_object_count(&records, 2);

    assert_eq!(top.len(), 2);
    assert_eq!(*top[0].agent_id(), 3);
    assert_eq!(*top[1].agent_id(), 2);
}

#[test]
fn test_first_seen_name_wins() {
    let records = listings(&[(4, "Oude Naam"), (4, "Nieuwe Naam")]);

    assert_eq!(
        top_by_object_count(&records, 10),
        vec![AgentStat::new(4, "Oude Naam", 2)]
    );
}

#[test]
fn test_agent_id_zero_with_a_name_is_kept() {
    let records = listings(&[(0, "Onbekend"), (0, "Onbekend"), (1, "A")]);

    let top = top_by_object_count(&records, 10);

    assert_eq!(top[0], AgentStat::new(0, "Onbekend", 2));
}

#[test]
fn test_empty_input_and_zero_top_n() {
    assert!(top_by_object_count(&Vec::<Listing>::new(), 10).is_empty());

    let records = listings(&[(1, "A")]);
    assert!(top_by_object_count(&records, 0).is_empty());
}

#[test]
fn test_equal_count_and_name_keep_first_seen_order() {
    let records = listings(&[(9, "Same"), (2, "Same")]);

    let ids: Vec<i64> = top_by_object_count(&records, 10)
        .iter()
        .map(|stat| *stat.agent_id())
        .collect();

    assert_eq!(ids, vec![9, 2]);
}

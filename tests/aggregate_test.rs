//! Tests for cost roll-up, effective status and statistics

use std::collections::HashSet;

use bomtree::domain::{
    add_child, collect_selected, effective_status, status_stats, total_cost, BomData,
    ComplianceData, ComplianceStatus, Level, MaterialAttrs, Node, Ordinal,
};
use chrono::{Duration, NaiveDate};

fn material(cost: f64, quantity: u32) -> BomData {
    BomData::Material(MaterialAttrs {
        part_name: "part".to_string(),
        quantity,
        unit: "pcs".to_string(),
        cost,
        supplier: "acme".to_string(),
        ..MaterialAttrs::default()
    })
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn compliance_node(
    status: ComplianceStatus,
    days_out: Option<i64>,
) -> Node<ComplianceData> {
    Node::root(
        Ordinal::FIRST,
        "cert",
        ComplianceData {
            status,
            expire_date: days_out.map(|d| as_of() + Duration::days(d)),
        },
    )
}

// ============================================================
// Cost Roll-up Tests
// ============================================================

#[test]
fn given_single_material_node_when_rolling_up_then_cost_times_quantity() {
    let root = Node::root(Ordinal::FIRST, "Machine", BomData::Structural);
    let part = Node::child_at(
        &root,
        Level::MATERIAL,
        Ordinal::FIRST,
        "Part",
        material(10.0, 3),
    )
    .unwrap();
    let root = add_child(&root, root.id, part).unwrap();

    assert_eq!(total_cost(&root), 30.0);
}

#[test]
fn given_material_payload_below_part_tier_when_rolling_up_then_ignored() {
    let root = Node::root(Ordinal::FIRST, "Machine", BomData::Structural);
    let unit = Node::child_at(
        &root,
        Level::new(3).unwrap(),
        Ordinal::FIRST,
        "Unit",
        material(10.0, 2),
    )
    .unwrap();
    let root = add_child(&root, root.id, unit).unwrap();

    assert_eq!(total_cost(&root), 0.0);
}

#[test]
fn given_structural_only_tree_when_rolling_up_then_zero() {
    let root = Node::root(Ordinal::FIRST, "Machine", BomData::Structural);
    let unit = Node::child_of(&root, Ordinal::FIRST, "Unit", BomData::Structural).unwrap();
    let root = add_child(&root, root.id, unit).unwrap();

    assert_eq!(total_cost(&root), 0.0);
}

#[test]
fn given_nested_parts_when_rolling_up_then_subtree_sums_compose() {
    let root = Node::root(Ordinal::FIRST, "Machine", BomData::Structural);
    let unit = Node::child_of(&root, Ordinal::FIRST, "Unit", BomData::Structural).unwrap();
    let root = add_child(&root, root.id, unit.clone()).unwrap();

    let p1 = Node::child_at(
        &unit,
        Level::MATERIAL,
        Ordinal::FIRST,
        "P1",
        material(100.0, 2),
    )
    .unwrap();
    let root = add_child(&root, unit.id, p1.clone()).unwrap();

    let alt = Node::child_of(&p1, Ordinal::FIRST, "Alt", material(80.0, 2)).unwrap();
    let root = add_child(&root, p1.id, alt).unwrap();

    // Alternates contribute alongside their primary part.
    assert_eq!(total_cost(&root), 100.0 * 2.0 + 80.0 * 2.0);

    let subtree = bomtree::domain::find_node(&root, p1.id).unwrap();
    assert_eq!(total_cost(subtree), 360.0);
}

// ============================================================
// Effective Status Tests
// ============================================================

#[test]
fn given_compliant_cert_expiring_in_30_days_then_effective_status_is_expiring() {
    let node = compliance_node(ComplianceStatus::Compliant, Some(30));
    assert_eq!(effective_status(&node, as_of()), ComplianceStatus::Expiring);
}

#[test]
fn given_compliant_cert_expiring_in_200_days_then_stays_compliant() {
    let node = compliance_node(ComplianceStatus::Compliant, Some(200));
    assert_eq!(effective_status(&node, as_of()), ComplianceStatus::Compliant);
}

#[test]
fn given_missing_cert_then_always_missing_regardless_of_expiry() {
    for days in [Some(-10), Some(0), Some(30), Some(200), None] {
        let node = compliance_node(ComplianceStatus::Missing, days);
        assert_eq!(effective_status(&node, as_of()), ComplianceStatus::Missing);
    }
}

#[test]
fn given_expiry_window_boundaries_then_0_and_90_reclassify_but_91_does_not() {
    for (days, expected) in [
        (0, ComplianceStatus::Expiring),
        (90, ComplianceStatus::Expiring),
        (91, ComplianceStatus::Compliant),
    ] {
        let node = compliance_node(ComplianceStatus::Compliant, Some(days));
        assert_eq!(effective_status(&node, as_of()), expected, "days={days}");
    }
}

#[test]
fn given_already_expired_compliant_cert_then_stored_status_passes_through() {
    // Past-expiry certificates are not reclassified; only the 0..=90 day
    // window ahead of expiry is.
    let node = compliance_node(ComplianceStatus::Compliant, Some(-1));
    assert_eq!(effective_status(&node, as_of()), ComplianceStatus::Compliant);
}

#[test]
fn given_compliant_cert_without_expiry_then_stays_compliant() {
    let node = compliance_node(ComplianceStatus::Compliant, None);
    assert_eq!(effective_status(&node, as_of()), ComplianceStatus::Compliant);
}

// ============================================================
// Statistics Tests
// ============================================================

#[test]
fn given_forest_when_counting_statuses_then_every_node_is_bucketed() {
    let root_a = compliance_node(ComplianceStatus::Compliant, None);
    let child = Node::child_of(
        &root_a,
        Ordinal::FIRST,
        "Unit",
        ComplianceData {
            status: ComplianceStatus::Compliant,
            expire_date: Some(as_of() + Duration::days(10)),
        },
    )
    .unwrap();
    let root_a = add_child(&root_a, root_a.id, child).unwrap();
    let root_b = compliance_node(ComplianceStatus::Missing, None);

    let stats = status_stats(&[root_a, root_b], as_of());

    assert_eq!(stats.compliant, 1);
    assert_eq!(stats.expiring, 1);
    assert_eq!(stats.missing, 1);
    assert_eq!(stats.total(), 3);
}

#[test]
fn given_parent_with_missing_child_when_counting_then_no_propagation_to_parent() {
    let root = compliance_node(ComplianceStatus::Compliant, None);
    let child = Node::child_of(
        &root,
        Ordinal::FIRST,
        "Unit",
        ComplianceData {
            status: ComplianceStatus::Missing,
            expire_date: None,
        },
    )
    .unwrap();
    let root = add_child(&root, root.id, child).unwrap();

    // Status is stored per node; the parent keeps its own classification.
    assert_eq!(effective_status(&root, as_of()), ComplianceStatus::Compliant);
    let stats = status_stats(&[root], as_of());
    assert_eq!(stats.compliant, 1);
    assert_eq!(stats.missing, 1);
}

// ============================================================
// Selection Tests
// ============================================================

#[test]
fn given_id_subset_when_collecting_then_traversal_order_is_preserved() {
    let root_a = compliance_node(ComplianceStatus::Compliant, None);
    let child = Node::child_of(
        &root_a,
        Ordinal::FIRST,
        "Unit",
        ComplianceData {
            status: ComplianceStatus::Missing,
            expire_date: None,
        },
    )
    .unwrap();
    let child_id = child.id;
    let root_a = add_child(&root_a, root_a.id, child).unwrap();
    let root_b = compliance_node(ComplianceStatus::Missing, None);
    let forest = vec![root_a, root_b];

    let mut selected = HashSet::new();
    selected.insert(forest[1].id);
    selected.insert(child_id);
    selected.insert(bomtree::domain::NodeId::new()); // unknown id is ignored

    let rows = collect_selected(&forest, &selected);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, child_id);
    assert_eq!(rows[1].id, forest[1].id);
}

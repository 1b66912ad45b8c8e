//! Tests for the forest adapter

use bomtree::domain::{
    add_child_in_forest, collect_forest_ids, delete_in_forest, find_in_forest,
    forest_sibling_count, update_in_forest, ComplianceData, ComplianceStatus, DomainError, Node,
    NodeId, NodePatch, Ordinal,
};

fn compliance(status: ComplianceStatus) -> ComplianceData {
    ComplianceData {
        status,
        expire_date: None,
    }
}

// Two independent root trees, one child each.
fn sample_forest() -> Vec<Node<ComplianceData>> {
    let mut forest = Vec::new();
    for (ordinal, title) in [(1, "Plant A"), (2, "Plant B")] {
        let root = Node::root(
            Ordinal::new(ordinal),
            title,
            compliance(ComplianceStatus::Compliant),
        );
        let child = Node::child_of(
            &root,
            Ordinal::FIRST,
            "Unit",
            compliance(ComplianceStatus::Missing),
        )
        .unwrap();
        let root = bomtree::domain::add_child(&root, root.id, child).unwrap();
        forest.push(root);
    }
    forest
}

#[test]
fn given_id_in_second_tree_when_finding_then_first_non_absent_result_wins() {
    let forest = sample_forest();
    let target = forest[1].children[0].id;

    let found = find_in_forest(&forest, target).unwrap();
    assert_eq!(found.position, "M2.U1");
}

#[test]
fn given_forest_when_updating_one_tree_then_others_are_copied_unchanged() {
    let forest = sample_forest();
    let target = forest[1].children[0].id;

    let updated = update_in_forest(&forest, target, &NodePatch::new().title("X")).unwrap();

    assert_eq!(updated.len(), 2);
    assert_eq!(updated[0], forest[0]);
    assert_eq!(find_in_forest(&updated, target).unwrap().title, "X");
}

#[test]
fn given_root_id_when_deleting_in_forest_then_forbidden() {
    let forest = sample_forest();
    let err = delete_in_forest(&forest, forest[1].id).unwrap_err();
    assert_eq!(err, DomainError::RootDeletionForbidden(forest[1].id));
}

#[test]
fn given_absent_id_when_mutating_forest_then_node_not_found() {
    let forest = sample_forest();
    let ghost = NodeId::new();

    assert_eq!(
        update_in_forest(&forest, ghost, &NodePatch::new().title("X")).unwrap_err(),
        DomainError::NodeNotFound(ghost)
    );
    assert_eq!(
        delete_in_forest(&forest, ghost).unwrap_err(),
        DomainError::NodeNotFound(ghost)
    );
}

#[test]
fn given_forest_when_adding_child_then_lands_in_owning_tree_only() {
    let forest = sample_forest();
    let parent_id = forest[0].id;
    let child = Node::child_of(
        &forest[0],
        Ordinal::after(forest_sibling_count(&forest, parent_id)),
        "Unit 2",
        compliance(ComplianceStatus::Compliant),
    )
    .unwrap();

    let grown = add_child_in_forest(&forest, parent_id, child).unwrap();

    assert_eq!(grown[0].children.len(), 2);
    assert_eq!(grown[0].children[1].position, "M1.U2");
    assert_eq!(grown[1], forest[1]);
}

#[test]
fn given_unknown_parent_when_adding_in_forest_then_parent_not_found() {
    let forest = sample_forest();
    let ghost = NodeId::new();
    let child = Node::child_of(
        &forest[0],
        Ordinal::FIRST,
        "x",
        compliance(ComplianceStatus::Compliant),
    )
    .unwrap();

    assert_eq!(
        add_child_in_forest(&forest, ghost, child).unwrap_err(),
        DomainError::ParentNotFound(ghost)
    );
}

#[test]
fn given_forest_when_collecting_ids_then_root_order_is_preserved() {
    let forest = sample_forest();
    let ids = collect_forest_ids(&forest);

    assert_eq!(ids.len(), 4);
    assert_eq!(ids[0], forest[0].id);
    assert_eq!(ids[2], forest[1].id);
}

#[test]
fn given_absent_parent_when_counting_forest_siblings_then_zero() {
    let forest = sample_forest();
    assert_eq!(forest_sibling_count(&forest, NodeId::new()), 0);
    assert_eq!(forest_sibling_count(&forest, forest[0].id), 1);
}

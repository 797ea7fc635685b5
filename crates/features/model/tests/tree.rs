use proptest::prelude::*;
use twin_model::{
    DataType, Lookup, ModelType, Multiplicity, Node, Qualifier, Reference, Tree, Value,
};

fn nameplate() -> (Tree, twin_model::NodeId) {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("Nameplate"));
    for (id_short, value) in [("ManufacturerName", "ACME"), ("SerialNumber", "SN-1")] {
        let child = tree.insert(Node::string_property(id_short, value));
        assert!(tree.add(root, child));
    }
    (tree, root)
}

#[test]
fn add_links_parent_and_child() {
    let (tree, root) = nameplate();
    let children = tree.children(root);

    assert_eq!(children.len(), 2);
    assert_eq!(tree.parent(children[0]), Some(root));
    assert_eq!(tree.get(children[1]).map(Node::id_short), Some("SerialNumber"));
    assert_eq!(tree.len(), 3);
}

#[test]
fn add_rejects_second_parent() {
    let (mut tree, root) = nameplate();
    let other = tree.insert(Node::collection("Other"));
    let serial = tree.children(root)[1];

    assert!(!tree.add(other, serial));
    assert_eq!(tree.parent(serial), Some(root));
    assert!(tree.children(other).is_empty());
}

#[test]
fn add_rejects_non_container_parent() {
    let mut tree = Tree::new();
    let leaf = tree.insert(Node::string_property("Leaf", "x"));
    let child = tree.insert(Node::string_property("Child", "y"));

    assert!(!tree.add(leaf, child));
    assert_eq!(tree.parent(child), None);
}

#[test]
fn append_frees_nodes_it_cannot_link() {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("Root"));
    let leaf = tree.append(root, Node::string_property("Leaf", "x")).expect("linked");

    assert_eq!(tree.parent(leaf), Some(root));
    assert_eq!(tree.append(leaf, Node::string_property("Child", "y")), None);
    assert_eq!(tree.len(), 2);
}

#[test]
fn add_rejects_cycles() {
    let mut tree = Tree::new();
    let outer = tree.insert(Node::collection("Outer"));
    let inner = tree.insert(Node::collection("Inner"));
    assert!(tree.add(outer, inner));

    assert!(!tree.add(inner, outer), "an ancestor cannot become a descendant");
    assert!(!tree.add(outer, outer), "a node cannot contain itself");
}

#[test]
fn stale_ids_are_rejected_after_destroy() {
    let (mut tree, root) = nameplate();
    let serial = tree.children(root)[1];

    assert!(tree.destroy(serial));
    assert!(!tree.contains(serial));
    assert!(tree.get(serial).is_none());
    assert!(!tree.destroy(serial));

    let reused = tree.insert(Node::string_property("Fresh", "1"));
    assert_ne!(reused, serial, "a reused index still yields a fresh id");
    assert!(!tree.add(root, serial));
    assert!(tree.add(root, reused));
}

#[test]
fn find_matches_id_short_case_insensitively() {
    let (tree, root) = nameplate();

    let found = tree.find(root, Lookup::IdShort("serialNUMBER"));
    assert_eq!(found, Some(tree.children(root)[1]));
    assert_eq!(tree.find(root, Lookup::IdShort("Missing")), None);
}

#[test]
fn find_matches_semantic_id_by_keys() {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("Root"));
    let tagged = tree.insert(
        Node::string_property("Tagged", "v")
            .with_semantic_id(Reference::external("https://example.org/concept")),
    );
    let plain = tree.insert(Node::string_property("Plain", "v"));
    assert!(tree.add(root, plain));
    assert!(tree.add(root, tagged));

    let mut lookup = Reference::external("https://example.org/concept");
    lookup.reference_type = twin_model::ReferenceType::ModelReference;

    assert_eq!(tree.find(root, Lookup::SemanticId(&lookup)), Some(tagged));
}

#[test]
fn find_path_walks_nested_collections() {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("Root"));
    let scheduling = tree.insert(Node::collection("Scheduling"));
    let start = tree.insert(Node::string_property("StartDateTime", "2024-01-01 08:00:00"));
    assert!(tree.add(root, scheduling));
    assert!(tree.add(scheduling, start));

    assert_eq!(tree.find_path(root, &["scheduling", "startDateTime"]), Some(start));
    assert_eq!(tree.find_path(root, &["Scheduling", "EndDateTime"]), None);
}

#[test]
fn remove_destroys_first_match_with_subtree() {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("Root"));
    let group = tree.insert(Node::collection("Group"));
    let leaf = tree.insert(Node::string_property("Leaf", "x"));
    assert!(tree.add(root, group));
    assert!(tree.add(group, leaf));

    assert!(tree.remove(root, |node| node.id_short() == "Group"));
    assert!(!tree.contains(leaf));
    assert!(tree.children(root).is_empty());
    assert!(!tree.remove(root, |_| true));
}

#[test]
fn clear_counts_destroyed_children() {
    let (mut tree, root) = nameplate();

    assert_eq!(tree.clear(root), 2);
    assert!(tree.children(root).is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn detach_keeps_node_alive() {
    let (mut tree, root) = nameplate();
    let serial = tree.children(root)[1];

    assert!(tree.detach(serial));
    assert!(tree.contains(serial));
    assert_eq!(tree.parent(serial), None);
    assert!(!tree.detach(serial));

    let other = tree.insert(Node::collection("Other"));
    assert!(tree.add(other, serial));
}

#[test]
fn insert_child_clamps_index() {
    let (mut tree, root) = nameplate();
    let first = tree.insert(Node::string_property("First", "0"));
    let last = tree.insert(Node::string_property("Last", "9"));

    assert!(tree.insert_child(root, 0, first));
    assert!(tree.insert_child(root, 99, last));

    let names: Vec<_> = tree
        .children(root)
        .iter()
        .filter_map(|id| tree.get(*id).map(Node::id_short))
        .collect();
    assert_eq!(names, ["First", "ManufacturerName", "SerialNumber", "Last"]);
}

#[test]
fn ordered_list_accepts_anonymous_items() {
    let mut tree = Tree::new();
    let list = tree.insert(Node::list("Measurements", ModelType::Property));
    let item = tree.insert(Node::property("", DataType::Double, "1.5").anonymous());

    assert!(tree.add(list, item));
    assert_eq!(tree.get(item).map(Node::id_short), Some(""));
    assert!(matches!(tree.get(list).map(|node| &node.value), Some(Value::OrderedList(_))));
}

#[test]
fn descendants_are_pre_order() {
    let mut tree = Tree::new();
    let root = tree.insert(Node::collection("Root"));
    let a = tree.insert(Node::collection("A"));
    let a1 = tree.insert(Node::string_property("A1", ""));
    let b = tree.insert(Node::string_property("B", ""));
    assert!(tree.add(root, a));
    assert!(tree.add(a, a1));
    assert!(tree.add(root, b));

    assert_eq!(tree.descendants(root), vec![root, a, a1, b]);
}

#[test]
fn multiplicity_qualifier_round_trips_label() {
    let qualifier = Qualifier::multiplicity(Multiplicity::ZeroToMany);

    assert_eq!(qualifier.qualifier_type, "Cardinality");
    assert_eq!(qualifier.value.as_deref(), Some("ZeroToMany"));
    assert_eq!(qualifier.as_multiplicity(), Some(Multiplicity::ZeroToMany));
}

#[test]
fn set_scalar_keeps_value_type() {
    let mut node = Node::property("Count", DataType::Integer, "1");

    assert!(node.set_scalar("2"));
    assert_eq!(node.scalar(), Some("2"));
    assert_eq!(node.value_type(), Some(DataType::Integer));
    assert!(!Node::collection("C").set_scalar("x"));
}

#[test]
fn data_type_parses_with_or_without_prefix() {
    assert_eq!(DataType::parse_lenient("anyURI"), Some(DataType::AnyUri));
    assert_eq!(DataType::parse_lenient("xs:boolean"), Some(DataType::Boolean));
    assert_eq!(DataType::parse_lenient("nonsense"), None);
}

proptest! {
    #[test]
    fn node_count_tracks_inserts_and_clears(count in 0usize..32) {
        let mut tree = Tree::new();
        let root = tree.insert(Node::collection("Root"));
        for index in 0..count {
            let child = tree.insert(Node::string_property(format!("P{index}"), "v"));
            prop_assert!(tree.add(root, child));
        }

        prop_assert_eq!(tree.len(), count + 1);
        prop_assert_eq!(tree.clear(root), count);
        prop_assert_eq!(tree.len(), 1);
    }

    #[test]
    fn every_child_points_back_to_its_parent(depth in 1usize..12) {
        let mut tree = Tree::new();
        let root = tree.insert(Node::collection("Root"));
        let mut current = root;
        for level in 0..depth {
            let next = tree.insert(Node::collection(format!("L{level}")));
            prop_assert!(tree.add(current, next));
            current = next;
        }

        for id in tree.descendants(root) {
            for child in tree.children(id) {
                prop_assert_eq!(tree.parent(*child), Some(id));
            }
        }
        prop_assert!(!tree.add(current, root));
    }
}

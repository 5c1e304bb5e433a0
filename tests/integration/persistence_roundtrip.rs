use arbor::store::{load_tree, save_tree};
use arbor::tree::Node;
use proptest::prelude::*;
use tempfile::TempDir;

fn leaf() -> impl Strategy<Value = Node> {
    (
        "[a-z_]{1,8}\\.py",
        ".{0,40}",
        prop::collection::vec(".{0,20}", 0..3),
        ".{0,20}",
    )
        .prop_map(|(name, code, elements, summary)| {
            let path = format!("/p/{}", name);
            let mut node = Node::file(name, path, code, elements);
            node.summary = summary;
            node
        })
}

fn tree() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        ("[a-z]{1,6}", prop::collection::vec(inner, 0..4), ".{0,20}").prop_map(
            |(name, children, summary)| {
                let mut dir = Node::directory(name.clone(), format!("/p/{}", name));
                dir.summary = summary;
                for child in children {
                    dir.add_child(child);
                }
                dir
            },
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn saved_trees_load_back_unchanged(root in tree()) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("tree.json");
        save_tree(&root, &path).unwrap();
        let loaded = load_tree(&path).unwrap();
        prop_assert_eq!(loaded, root);
    }
}

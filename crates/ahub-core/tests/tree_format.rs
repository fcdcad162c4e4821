//! The stored Tree format and digest ordering must stay stable: Trees
//! written by one build are read back by another, and missing-digest lists
//! appear verbatim in error messages.

use ahub_core::{Digest, DigestSet, Directory, DirectoryNode, FileNode, InstanceName, RemoteDigest, Tree};

#[test]
fn tree_json_layout_is_stable() {
    let tree = Tree {
        root: Directory {
            files: vec![FileNode {
                name: "a".into(),
                digest: RemoteDigest::new("eda14e187a768b38eda999457c9cca1e", 6),
                is_executable: false,
            }],
            directories: vec![DirectoryNode {
                name: "sub".into(),
                digest: RemoteDigest::new("7a3435d88e819881cbe9d430a340d157", 10),
            }],
            symlinks: vec![],
        },
        children: vec![],
    };
    let value: serde_json::Value = serde_json::from_slice(&tree.encode().unwrap()).unwrap();
    assert_eq!(value["root"]["files"][0]["digest"]["hash"], "eda14e187a768b38eda999457c9cca1e");
    assert_eq!(value["root"]["directories"][0]["digest"]["size_bytes"], 10);
    assert_eq!(Tree::decode(&tree.encode().unwrap()).unwrap(), tree);
}

#[test]
fn tree_without_children_field_decodes() {
    let tree = Tree::decode(br#"{"root":{"files":[],"directories":[],"symlinks":[]}}"#).unwrap();
    assert!(tree.children.is_empty());
    assert_eq!(tree.directories().count(), 1);
}

#[test]
fn digest_set_lists_in_sorted_order() {
    let instance = InstanceName::new("main").unwrap();
    let set: DigestSet = ["6c396013ff0ebff6a2a96cdc20a4ba4c", "0c396013ff0ebff6a2a96cdc20a4ba4c"]
        .into_iter()
        .map(|h| Digest::new(instance.clone(), h, 5).unwrap())
        .collect();
    assert_eq!(
        set.to_string(),
        "[0c396013ff0ebff6a2a96cdc20a4ba4c-5-main, 6c396013ff0ebff6a2a96cdc20a4ba4c-5-main]"
    );
}

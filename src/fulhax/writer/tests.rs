use super::*;
use crate::fulhax::format::{NodeType, FULHAX_MAGIC, NODE_HEADER_SIZE};
use crate::fulhax::{IArchive, IndexArrayNode, MaterialNode, Node, TransformNode, VertexArrayNode};
use crate::scene::{ObjectId, Scene, SceneGraph};
use crate::util::{Error, Result};
use tempfile::NamedTempFile;

fn material_names(bytes: Vec<u8>) -> Result<Vec<String>> {
    let archive = IArchive::from_bytes(bytes)?;
    archive
        .nodes()?
        .into_iter()
        .map(|node| match node {
            Node::Material(m) => Ok(m.name),
            other => Err(Error::invalid(format!("unexpected {:?}", other.node_type()))),
        })
        .collect()
}

#[test]
fn test_write_empty_archive() -> Result<()> {
    let temp = NamedTempFile::new()?;
    let path = temp.path();

    let archive = OArchive::create(path)?;
    assert_eq!(archive.nodes_written(), 0);
    archive.close()?;

    assert_eq!(std::fs::read(path)?, FULHAX_MAGIC.to_vec());
    Ok(())
}

#[test]
fn test_header_layout() -> Result<()> {
    let bytes = encode_nodes(&[Node::Material(MaterialNode::new("ab"))])?;
    assert_eq!(&bytes[..6], FULHAX_MAGIC);
    // payload_size, type_tag, child_count
    assert_eq!(&bytes[6..10], &6u32.to_le_bytes());
    assert_eq!(&bytes[10..12], &6u16.to_le_bytes());
    assert_eq!(&bytes[12..14], &0u16.to_le_bytes());
    assert_eq!(&bytes[14..], &[2, 0, 0, 0, b'a', b'b']);
    Ok(())
}

#[test]
fn test_record_round_trip() -> Result<()> {
    let nodes: Vec<Node> = vec![
        Node::Root,
        TransformNode::from_rows([
            1.0, 0.0, 0.0, 3.0,
            0.0, 1.0, 0.0, 4.0,
            0.0, 0.0, 1.0, 5.0,
            0.0, 0.0, 0.0, 1.0,
        ])
        .into(),
        VertexArrayNode::from_flat("Position", 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])?.into(),
        IndexArrayNode::from_flat(3, vec![0, 1, 1])?.into(),
        MaterialNode::default().into(),
    ];

    let mut archive = OArchive::from_writer(Vec::new())?;
    archive.write_nodes(&nodes)?;
    assert_eq!(archive.nodes_written(), nodes.len());
    let expected_len = 6 + nodes
        .iter()
        .map(|n| NODE_HEADER_SIZE as u64 + n.payload_len())
        .sum::<u64>();
    assert_eq!(archive.pos(), expected_len);
    let bytes = archive.close()?;
    assert_eq!(bytes.len() as u64, expected_len);

    let reader = IArchive::from_bytes(bytes)?;
    let records = reader.records().collect::<Result<Vec<_>>>()?;
    assert_eq!(records.len(), nodes.len());
    for (record, node) in records.iter().zip(&nodes) {
        assert_eq!(record.header.payload_size, node.payload_size()?);
        assert_eq!(record.node_type(), Some(node.node_type()));
        assert_eq!(record.header.child_count, 0);

        let mut payload = OStream::new(Vec::new());
        node.write_payload(&mut payload)?;
        assert_eq!(record.payload, payload.into_inner()?.as_slice());
    }

    assert_eq!(reader.nodes()?, nodes);
    Ok(())
}

#[test]
fn test_ancestor_chain_root_first() -> Result<()> {
    let mut scene = Scene::new();
    let root = scene.add_object("root", None);
    let arm = scene.add_object("arm", Some(root));
    let hand = scene.add_object("hand", Some(arm));

    let mut archive = OArchive::from_writer(Vec::new())?;
    assert_eq!(archive.emit_ancestor_chain(&scene, hand)?, 3);
    assert_eq!(archive.emit_ancestor_chain(&scene, root)?, 1);
    let names = material_names(archive.close()?)?;
    assert_eq!(names, ["root", "arm", "hand", "root"]);
    Ok(())
}

#[test]
fn test_shared_ancestors_are_repeated() -> Result<()> {
    let mut scene = Scene::new();
    let body = scene.add_object("body", None);
    let left = scene.add_object("wheel_l", Some(body));
    let right = scene.add_object("wheel_r", Some(body));

    let mut archive = OArchive::from_writer(Vec::new())?;
    for id in [left, right] {
        archive.emit_ancestor_chain(&scene, id)?;
    }
    let names = material_names(archive.close()?)?;
    assert_eq!(names, ["body", "wheel_l", "body", "wheel_r"]);
    Ok(())
}

#[test]
fn test_ancestor_cycle_is_rejected() -> Result<()> {
    let mut scene = Scene::new();
    let a = scene.add_object("a", None);
    let b = scene.add_object("b", Some(a));
    scene.objects[a.0].parent = Some(b);

    let mut archive = OArchive::from_writer(Vec::new())?;
    let err = archive.emit_ancestor_chain(&scene, b).unwrap_err();
    assert!(matches!(err, Error::CyclicHierarchy(ref name) if name == "b"));
    // Nothing is written for a rejected chain.
    assert_eq!(archive.nodes_written(), 0);

    scene.objects[a.0].parent = Some(a);
    let err = archive.emit_ancestor_chain(&scene, a).unwrap_err();
    assert!(matches!(err, Error::CyclicHierarchy(_)));
    Ok(())
}

#[test]
fn test_ancestor_missing_parent() -> Result<()> {
    let mut scene = Scene::new();
    let orphan = scene.add_object("orphan", Some(ObjectId(42)));
    assert_eq!(scene.parent(orphan), Some(ObjectId(42)));

    let mut archive = OArchive::from_writer(Vec::new())?;
    let err = archive.emit_ancestor_chain(&scene, orphan).unwrap_err();
    assert!(matches!(err, Error::ObjectNotFound(_)));
    Ok(())
}

#[test]
fn test_write_failure_propagates() {
    struct FailAfter(usize);
    impl std::io::Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.0 < buf.len() {
                return Err(std::io::Error::other("sink closed"));
            }
            self.0 -= buf.len();
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut archive = OArchive::from_writer(FailAfter(10)).unwrap();
    let err = archive.write_node(&MaterialNode::default().into()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(archive.nodes_written(), 0);
}

#[test]
fn test_node_type_tags_on_wire() -> Result<()> {
    let nodes = [
        Node::Root,
        TransformNode::identity().into(),
        VertexArrayNode::new("Normal", 3)?.into(),
        IndexArrayNode::new(3)?.into(),
        MaterialNode::default().into(),
    ];
    let reader = IArchive::from_bytes(encode_nodes(&nodes)?)?;
    let tags: Vec<u16> = reader
        .records()
        .map(|r| r.map(|r| r.header.type_tag))
        .collect::<Result<_>>()?;
    assert_eq!(tags, [0, 1, 4, 5, 6]);
    assert_eq!(
        reader.records().next().transpose()?.and_then(|r| r.node_type()),
        Some(NodeType::Root)
    );
    Ok(())
}

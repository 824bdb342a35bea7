//! Byte layout checks and malformed input handling for .tesm files.

use tesm::fulhax::{
    IArchive, IndexArrayNode, MaterialNode, Node, NodeType, OArchive, VertexArrayNode,
};
use tesm::Error;

use std::fs::File;
use std::io::Read;
use tempfile::tempdir;

fn hexdump(buf: &[u8]) {
    for (i, chunk) in buf.chunks(16).enumerate() {
        print!("{:04x}: ", i * 16);
        for b in chunk {
            print!("{:02x} ", b);
        }
        print!(" |");
        for b in chunk {
            let c = if (0x20..0x7f).contains(b) { *b as char } else { '.' };
            print!("{}", c);
        }
        println!("|");
    }
}

#[test]
fn test_minimal_layout() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("minimal.tesm");

    {
        let mut archive = OArchive::create(&path).expect("Failed to create archive");
        archive
            .write_node(&MaterialNode::new("a").into())
            .expect("Failed to write material");
        archive
            .write_node(&IndexArrayNode::from_flat(3, vec![0, 1, 2]).expect("bad indices").into())
            .expect("Failed to write indices");
        archive.close().expect("Failed to close archive");
    }

    let mut buf = Vec::new();
    File::open(&path)
        .expect("Failed to open output")
        .read_to_end(&mut buf)
        .expect("Failed to read output");
    hexdump(&buf);

    #[rustfmt::skip]
    let expected: Vec<u8> = [
        &b"FULHAX"[..],
        // material: size 5, tag 6, children 0, "a"
        &[5, 0, 0, 0, 6, 0, 0, 0],
        &[1, 0, 0, 0, b'a'],
        // index array: size 17, tag 5
        &[17, 0, 0, 0, 5, 0, 0, 0],
        &[3, 3, 0, 0, 0],
        &[0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0],
    ]
    .concat();
    assert_eq!(buf, expected);
}

#[test]
fn test_record_offsets() {
    let nodes: Vec<Node> = vec![
        Node::Root,
        VertexArrayNode::from_flat("TexCoord0", 2, vec![0.0, 1.0])
            .expect("bad array")
            .into(),
        MaterialNode::default().into(),
    ];
    let bytes = tesm::fulhax::encode_nodes(&nodes).expect("Failed to encode");
    let archive = IArchive::from_bytes(bytes).expect("Failed to open");

    let records: Vec<_> = archive
        .records()
        .collect::<Result<_, _>>()
        .expect("Failed to frame records");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].offset, 6);
    assert_eq!(records[0].header.payload_size, 0);
    assert_eq!(records[1].offset, 14);
    // 4 + 9 + 1 + 4 + 8
    assert_eq!(records[1].header.payload_size, 26);
    assert_eq!(records[2].offset, 14 + 8 + 26);
    assert_eq!(records[2].node_type(), Some(NodeType::Material));
}

#[test]
fn test_open_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = IArchive::open(dir.path().join("nope.tesm")).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}

#[test]
fn test_bad_magic() {
    assert!(matches!(
        IArchive::from_bytes(b"FULHAZ".to_vec()),
        Err(Error::InvalidMagic)
    ));
    assert!(matches!(
        IArchive::from_bytes(b"Ogawa\xff\x00\x01".to_vec()),
        Err(Error::InvalidMagic)
    ));
    assert!(matches!(
        IArchive::from_bytes(b"FUL".to_vec()),
        Err(Error::UnexpectedEof(3))
    ));
}

#[test]
fn test_truncated_record() {
    let mut bytes = tesm::fulhax::encode_nodes(&[Node::from(MaterialNode::new("wheel"))])
        .expect("Failed to encode");
    bytes.truncate(bytes.len() - 2);

    let archive = IArchive::from_bytes(bytes).expect("Magic is intact");
    let results: Vec<_> = archive.records().collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(Error::UnexpectedEof(_))));
    assert!(archive.nodes().is_err());
}

#[test]
fn test_truncated_header() {
    let mut bytes = b"FULHAX".to_vec();
    bytes.extend_from_slice(&[0, 0, 0]);
    let archive = IArchive::from_bytes(bytes).expect("Magic is intact");
    assert!(matches!(
        archive.records().next(),
        Some(Err(Error::UnexpectedEof(_)))
    ));
}

#[test]
fn test_reserved_tags_rejected() {
    for tag in [2u16, 3, 7, 0xffff] {
        let mut bytes = b"FULHAX".to_vec();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&tag.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());

        let archive = IArchive::from_bytes(bytes).expect("Magic is intact");
        let record = archive
            .records()
            .next()
            .expect("one record")
            .expect("framing is valid");
        match record.decode() {
            Err(Error::UnknownNodeType(t)) => assert_eq!(t, tag),
            other => panic!("tag {} decoded as {:?}", tag, other),
        }
    }
}

#[test]
fn test_trailing_payload_bytes() {
    let mut bytes = b"FULHAX".to_vec();
    // material with a 1-byte name and one stray byte
    bytes.extend_from_slice(&[6, 0, 0, 0, 6, 0, 0, 0]);
    bytes.extend_from_slice(&[1, 0, 0, 0, b'x', 0xaa]);

    let archive = IArchive::from_bytes(bytes).expect("Magic is intact");
    assert!(matches!(archive.nodes(), Err(Error::InvalidStructure(_))));
}

#[test]
fn test_invalid_utf8_name() {
    let mut bytes = b"FULHAX".to_vec();
    bytes.extend_from_slice(&[6, 0, 0, 0, 6, 0, 0, 0]);
    bytes.extend_from_slice(&[2, 0, 0, 0, 0xff, 0xfe]);

    let archive = IArchive::from_bytes(bytes).expect("Magic is intact");
    let err = archive.nodes().unwrap_err();
    assert!(matches!(err, Error::Encoding(_)), "got {:?}", err);
}

#[test]
fn test_oversized_payload_size() {
    let mut bytes = b"FULHAX".to_vec();
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    bytes.extend_from_slice(&6u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&[1, 0, 0, 0, b'x']);

    let archive = IArchive::from_bytes(bytes).expect("Magic is intact");
    let results: Vec<_> = archive.records().collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(Error::UnexpectedEof(_))));
}

#[test]
fn test_bad_vertex_array_payload() {
    // Declared count of 3 floats with 2 components per vertex.
    let mut payload = Vec::new();
    payload.extend_from_slice(&1u32.to_le_bytes());
    payload.push(b'P');
    payload.push(2);
    payload.extend_from_slice(&3u32.to_le_bytes());
    for v in [0f32, 1.0, 2.0] {
        payload.extend_from_slice(&v.to_le_bytes());
    }

    let mut bytes = b"FULHAX".to_vec();
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&4u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&payload);

    let archive = IArchive::from_bytes(bytes).expect("Magic is intact");
    assert!(matches!(archive.nodes(), Err(Error::InvalidMesh(_))));
}

use crate::lwo::chunk::{ChunkIter, SubChunkIter};
use crate::lwo::testutil::{chunk, sub_chunk};
use crate::lwo::{LwoError, Result};

#[test]
fn iterates_chunks_with_odd_padding() {
	let mut bytes = chunk(b"AAAA", &[1, 2, 3]);
	bytes.extend_from_slice(&chunk(b"BBBB", &[4, 5]));

	let chunks: Vec<_> = ChunkIter::new(&bytes, 0).collect::<Result<_>>().expect("chunks parse");
	assert_eq!(chunks.len(), 2);
	assert_eq!(chunks[0].tag, *b"AAAA");
	assert_eq!(chunks[0].payload, &[1, 2, 3]);
	assert_eq!(chunks[1].tag, *b"BBBB");
	// The pad byte after the odd payload keeps the second header aligned.
	assert_eq!(chunks[0].padded_len(), 4);
	assert_eq!(chunks[1].file_offset, chunks[0].file_offset + 8 + chunks[0].padded_len());
}

#[test]
fn unknown_chunk_skips_exactly_padded_len() {
	let mut bytes = chunk(b"AAAA", &[1, 2]);
	bytes.extend_from_slice(&chunk(b"????", &[9; 7]));
	bytes.extend_from_slice(&chunk(b"CCCC", &[3]));

	let chunks: Vec<_> = ChunkIter::new(&bytes, 0).collect::<Result<_>>().expect("chunks parse");
	assert_eq!(chunks.len(), 3);
	assert_eq!(chunks[2].tag, *b"CCCC");
	assert_eq!(chunks[2].payload, &[3]);
}

#[test]
fn declared_length_beyond_stream_is_malformed_container() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(b"AAAA");
	bytes.extend_from_slice(&100_u32.to_be_bytes());
	bytes.extend_from_slice(&[0; 4]);

	let err = ChunkIter::new(&bytes, 0).next().expect("one item").expect_err("should fail");
	let LwoError::MalformedContainer { tag, at, len, rem } = err else {
		panic!("expected malformed container");
	};
	assert_eq!(tag, *b"AAAA");
	assert_eq!(at, 0);
	assert_eq!(len, 100);
	assert_eq!(rem, 4);
}

#[test]
fn truncated_header_is_truncated_stream() {
	let bytes = b"AAA";
	let err = ChunkIter::new(bytes, 0).next().expect("one item").expect_err("should fail");
	assert!(matches!(err, LwoError::TruncatedStream { .. }));
}

#[test]
fn iteration_stops_after_error() {
	let mut iter = ChunkIter::new(b"AAA", 0);
	assert!(iter.next().expect("one item").is_err());
	assert!(iter.next().is_none());
}

#[test]
fn reserializes_byte_for_byte() {
	let mut bytes = chunk(b"AAAA", &[1, 2, 3]);
	bytes.extend_from_slice(&chunk(b"BBBB", &[4, 5]));
	bytes.extend_from_slice(&chunk(b"CCCC", &[]));

	let mut out = Vec::new();
	for item in ChunkIter::new(&bytes, 0) {
		item.expect("chunk parses").write_to(&mut out);
	}
	assert_eq!(out, bytes);
}

#[test]
fn iterates_sub_chunks() {
	let mut bytes = sub_chunk(b"COLR", &[0; 12]);
	bytes.extend_from_slice(&sub_chunk(b"DIFF", &[0; 4]));
	bytes.extend_from_slice(&sub_chunk(b"NAME", &[1, 2, 3]));

	let subs: Vec<_> = SubChunkIter::new(&bytes).collect::<Result<_>>().expect("subs parse");
	assert_eq!(subs.len(), 3);
	assert_eq!(subs[0].tag, *b"COLR");
	assert_eq!(subs[1].tag, *b"DIFF");
	assert_eq!(subs[2].payload, &[1, 2, 3]);
}

#[test]
fn sub_chunk_overrun_is_malformed() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(b"COLR");
	bytes.extend_from_slice(&40_u16.to_be_bytes());
	bytes.extend_from_slice(&[0; 8]);

	let err = SubChunkIter::new(&bytes).next().expect("one item").expect_err("should fail");
	assert!(matches!(err, LwoError::MalformedSubChunk { len: 40, .. }));
}

#[test]
fn trailing_pad_byte_ends_sub_chunk_iteration() {
	let mut bytes = sub_chunk(b"ENAB", &[0, 1]);
	bytes.push(0);

	let mut iter = SubChunkIter::new(&bytes);
	assert!(iter.next().expect("one item").is_ok());
	assert!(iter.next().is_none());
}

use crate::data::{
	CaseMetadata, CaseRecord, Compression, DataError, MalformedReason, RESULT_FILE_MAGIC, ResultFile, ToValue, ZSTD_MAGIC,
};

fn sample_file() -> ResultFile {
	let mut first = CaseRecord::new(CaseMetadata::new("alice"));
	first.add_result("student", touca_testkit::student_baseline().to_value());
	let mut second = CaseRecord::new(CaseMetadata::new("bob"));
	second.add_result("gpa", 3.1_f64);
	ResultFile {
		records: vec![first, second],
	}
}

#[test]
fn empty_file_layout() {
	let bytes = ResultFile::new().to_bytes();
	assert_eq!(bytes, [b'T', b'U', b'C', b'A', 1, 0, 0]);
	assert!(ResultFile::is_result_file(&bytes));
	assert_eq!(ResultFile::parse(&bytes).expect("empty file parses"), ResultFile::new());
}

#[test]
fn plain_file_round_trips() {
	let file = sample_file();
	let (compression, parsed) = ResultFile::from_bytes(file.to_bytes()).expect("plain file parses");
	assert_eq!(compression, Compression::None);
	assert_eq!(parsed, file);
}

#[test]
fn compressed_file_round_trips() {
	let file = sample_file();
	let bytes = file.to_compressed_bytes(3).expect("compresses");
	assert!(bytes.starts_with(&ZSTD_MAGIC));

	let (compression, parsed) = ResultFile::from_bytes(bytes).expect("compressed file parses");
	assert_eq!(compression, Compression::Zstd);
	assert_eq!(parsed, file);
}

#[test]
fn find_returns_first_matching_testcase() {
	let mut file = sample_file();
	let mut duplicate = CaseRecord::new(CaseMetadata::new("bob"));
	duplicate.add_result("gpa", 1.0_f64);
	file.records.push(duplicate);

	let found = file.find("bob").expect("bob is present");
	assert_eq!(found.results["gpa"], 3.1_f64.to_value());
	assert!(file.find("carol").is_none());
}

#[test]
fn foreign_magic_is_rejected() {
	let err = ResultFile::from_bytes(b"ABCDxx".to_vec()).expect_err("foreign magic");
	assert!(matches!(err, DataError::UnknownMagic { magic } if magic == *b"ABCD"));

	let err = ResultFile::from_bytes(vec![b'A']).expect_err("short input");
	assert!(matches!(err, DataError::UnknownMagic { magic } if magic == [b'A', 0, 0, 0]));
}

#[test]
fn compressed_non_result_payload_is_rejected() {
	let bytes = Compression::Zstd.encode(vec![0], 3).expect("compresses");
	let err = ResultFile::from_bytes(bytes).expect_err("bare value inside zstd");
	assert!(matches!(err, DataError::NotResultFileAfterDecompress));
}

#[test]
fn other_versions_are_rejected() {
	let mut bytes = RESULT_FILE_MAGIC.to_vec();
	bytes.extend_from_slice(&[2, 0, 0]);
	let err = ResultFile::parse(&bytes).expect_err("version 2");
	assert!(matches!(err, DataError::UnsupportedFormatVersion { version: 2 }));
}

#[test]
fn record_errors_report_file_offsets() {
	let mut bytes = RESULT_FILE_MAGIC.to_vec();
	bytes.extend_from_slice(&[1, 0, 1, 1, 5]);
	let err = ResultFile::parse(&bytes).expect_err("truncated record body");
	match err {
		DataError::MalformedEncoding { at, .. } => assert!(at >= 8, "offset {at} should be inside the record body"),
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn trailing_bytes_after_records_are_rejected() {
	let mut bytes = ResultFile::new().to_bytes();
	bytes.push(9);
	let err = ResultFile::parse(&bytes).expect_err("trailing byte");
	assert!(matches!(
		err,
		DataError::MalformedEncoding {
			at: 7,
			reason: MalformedReason::TrailingBytes { rem: 1 }
		}
	));
}

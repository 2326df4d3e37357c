use std::io::{self, Write};

use hessian_pack::{EncodeError, EncoderOptions, Hessian2Encoder, Resource, Value};
use tempfile::{tempdir, NamedTempFile};

fn file_with(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

#[test]
fn file_contents_are_written_as_binary() {
    let file = file_with(b"abc");
    let value = Value::Resource(Resource::File(file.path().to_path_buf()));
    let bytes = Hessian2Encoder::new().encode(&value).unwrap();
    assert_eq!(bytes, [0x23, b'a', b'b', b'c']);
}

#[test]
fn empty_file_is_empty_binary() {
    let file = file_with(b"");
    let value = Value::Resource(Resource::File(file.path().to_path_buf()));
    assert_eq!(Hessian2Encoder::new().encode(&value).unwrap(), [0x20]);
}

#[test]
fn oversized_file_is_refused() {
    let file = file_with(b"abc");
    let options = EncoderOptions {
        max_resource_size: 2,
        ..EncoderOptions::default()
    };
    let value = Value::Resource(Resource::File(file.path().to_path_buf()));
    let err = Hessian2Encoder::with_options(options)
        .encode(&value)
        .unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedType(_)), "{err}");
}

#[test]
fn directory_is_not_a_plain_file() {
    let dir = tempdir().expect("temp dir");
    let value = Value::Resource(Resource::File(dir.path().to_path_buf()));
    let err = Hessian2Encoder::new().encode(&value).unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedType(_)), "{err}");
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("missing.bin");
    let value = Value::Resource(Resource::File(path.clone()));
    let err = Hessian2Encoder::new().encode(&value).unwrap_err();
    match err {
        EncodeError::Resource { path: reported, source } => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn stream_resources_are_unsupported() {
    let value = Value::list(vec![
        Value::Int(1),
        Value::Resource(Resource::Stream {
            kind: "socket".into(),
        }),
    ]);
    let mut encoder = Hessian2Encoder::new();
    let err = encoder.encode(&value).unwrap_err();
    assert_eq!(err.to_string(), "unsupported value type: resource of type 'socket'");
    assert_eq!(encoder.writer.pending(), 0);
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn encode_into_appends_to_sink() {
    let mut encoder = Hessian2Encoder::new();
    let mut sink = vec![0xaa];
    let written = encoder.encode_into(&Value::Int(1), &mut sink).unwrap();
    assert_eq!(written, 1);
    assert_eq!(sink, [0xaa, 0x91]);
}

#[test]
fn sink_failure_is_reported() {
    let mut encoder = Hessian2Encoder::new();
    let err = encoder
        .encode_into(&Value::text("hi"), &mut FailingSink)
        .unwrap_err();
    match err {
        EncodeError::SinkFault(source) => assert_eq!(source.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {other}"),
    }
}

#![allow(missing_docs)]

use std::io::{self, Cursor, Read};

use nextline::{IoSource, Line, LineReader, ReaderOptions};

/// Reader that yields its data one byte per call, like a slow pipe.
struct Trickle<'a>(&'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some((&first, rest)) = self.0.split_first() else {
            return Ok(0);
        };
        if buf.is_empty() {
            return Ok(0);
        }
        buf[0] = first;
        self.0 = rest;
        Ok(1)
    }
}

/// Reader that fails on every call.
struct Broken;

impl Read for Broken {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"))
    }
}

#[test]
fn cursor_source_round_trips() {
    let text = b"first\n\nthird\r\nlast";
    let mut source = IoSource::new(10, Cursor::new(&text[..]));
    let mut reader = LineReader::new();

    let mut rejoined = Vec::new();
    loop {
        let line = reader.read_line(&mut source).unwrap();
        rejoined.extend_from_slice(line.as_bytes());
        if line.is_final() {
            break;
        }
        rejoined.push(b'\n');
    }
    assert_eq!(rejoined, text);
}

#[test]
fn trickling_source_still_splits_lines() {
    let mut source = IoSource::new(11, Trickle(b"ab\ncde\n"));
    let mut reader = LineReader::with_options(ReaderOptions {
        buffer_size: 64,
        initial_line_capacity: 0,
    });

    assert_eq!(reader.read_line(&mut source).unwrap(), Line::Complete("ab".into()));
    assert_eq!(reader.read_line(&mut source).unwrap(), Line::Complete("cde".into()));
    assert_eq!(reader.read_line(&mut source).unwrap(), Line::Final("".into()));
}

#[test]
fn broken_source_reports_error_every_call() {
    let mut source = IoSource::new(12, Broken);
    let mut reader = LineReader::new();

    for _ in 0..3 {
        let err = reader.read_line(&mut source).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert!(std::error::Error::source(&err).is_some());
    }
}

#[test]
fn io_source_accessors() {
    let mut source = IoSource::new(13, Cursor::new(vec![1u8, 2, 3]));
    assert_eq!(source.get_ref().get_ref().len(), 3);
    source.get_mut().set_position(2);
    assert_eq!(source.into_inner().position(), 2);
}

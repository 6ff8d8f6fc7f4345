//! Number the lines arriving on standard input.
//!
//! Reads descriptor 0 directly, so the reader's own buffer is the only
//! buffering between the pipe and the output.
//!
//! Run with
//!
//! ```bash
//! printf 'one\ntwo\nthree' | cargo run -p nextline --example cat_lines
//! ```
#![allow(missing_docs)]

use std::io::{self, Write};

use nextline::LineReader;

#[cfg(unix)]
fn main() -> io::Result<()> {
    let mut reader = LineReader::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for number in 1.. {
        let line = reader.read_line(0)?;
        let final_line = line.is_final();
        if !(final_line && line.as_bytes().is_empty()) {
            writeln!(out, "{number:>6}  {}", line.as_bstr())?;
        }
        if final_line {
            break;
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn main() -> io::Result<()> {
    let mut reader = LineReader::new();
    for (number, line) in reader.lines(nextline::IoSource::new(0, io::stdin())).enumerate() {
        println!("{:>6}  {}", number + 1, line?);
    }
    Ok(())
}


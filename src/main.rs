//! CLI entry point for the `zeek-syntax` tool.
//!
//! Parses each script named on the command line and reports diagnostics as
//! `path:line:col: message`. `--sexpr` prints the tree of every file and
//! `--comments` lists its comments.

use std::io::{self, Write};
use std::process::ExitCode;

use zeek_syntax::{CommentKind, LineIndex, Parsed, parse};

const USAGE: &str = "usage: zeek-syntax [--sexpr] [--comments] FILE...";

#[derive(Debug, Default)]
struct Options {
    sexpr: bool,
    comments: bool,
    files: Vec<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    for arg in args {
        match arg.as_str() {
            "--sexpr" => opts.sexpr = true,
            "--comments" => opts.comments = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ => opts.files.push(arg),
        }
    }
    if opts.files.is_empty() {
        return Err("no input files".to_string());
    }
    Ok(opts)
}

fn report(out: &mut impl Write, path: &str, parsed: &Parsed, opts: &Options) -> io::Result<()> {
    let index = LineIndex::new(parsed.source());
    for err in parsed.errors() {
        let (line, col) = index.line_col(err.span().start);
        writeln!(out, "{path}:{line}:{col}: {err}")?;
    }
    if opts.sexpr {
        writeln!(out, "{}", parsed.ast().sexpr())?;
    }
    if opts.comments {
        for comment in parsed.comments() {
            let (line, _) = index.line_col(comment.span.start);
            let marker = match comment.kind {
                CommentKind::Zeekygen => "##",
                CommentKind::Minor => "#",
            };
            writeln!(
                out,
                "{path}:{line}: {marker} {}",
                comment.body(parsed.source()).trim()
            )?;
        }
    }
    Ok(())
}

fn run(opts: &Options) -> io::Result<bool> {
    let mut out = io::stdout().lock();
    let mut clean = true;
    for path in &opts.files {
        let src = std::fs::read_to_string(path)
            .map_err(|e| io::Error::new(e.kind(), format!("{path}: {e}")))?;
        let parsed = parse(&src);
        clean &= parsed.errors().is_empty();
        report(&mut out, path, &parsed, opts)?;
    }
    Ok(clean)
}

fn main() -> ExitCode {
    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            let _ = writeln!(io::stderr(), "zeek-syntax: {msg}\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    match run(&opts) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            let _ = writeln!(io::stderr(), "zeek-syntax: {e}");
            ExitCode::from(2)
        }
    }
}

extern crate atty;
extern crate clap;
extern crate deskcalc;
extern crate liner;

use std::io::{self, stdin, stdout, BufRead, Write};
use std::process::exit;

use clap::{App, Arg, ArgMatches};
use deskcalc::{lookup, Calculator, Hook, Key, Kind};
use liner::{BasicCompleter, Context, Prompt};
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "[]> ";

/// Word that deletes the last character shown.
const BACKSPACE: &str = "bs";

/// How one word typed at the prompt reaches the engine.
#[derive(Debug, PartialEq)]
enum Word<'a> {
    Token(&'a str),
    Backspace,
    /// Literal characters, typed one key at a time.
    Keys(&'a str),
}

fn classify(word: &str) -> Word {
    if lookup(word).is_some() {
        Word::Token(word)
    } else if word == BACKSPACE {
        Word::Backspace
    } else if word.chars().all(|c| lookup(c.encode_utf8(&mut [0; 4])) == Some(Kind::Literal)) {
        Word::Keys(word)
    } else {
        Word::Token(word)
    }
}

fn feed<H: Hook>(calc: &mut Calculator<H>, word: &str) {
    match classify(word) {
        Word::Token(token) => {
            calc.handle_token(token);
        }
        Word::Backspace => {
            calc.handle_key(Key::BackSpace);
        }
        Word::Keys(keys) => {
            for c in keys.chars() {
                calc.handle_key(Key::Char(c));
            }
        }
    }
}

/// Feeds every word of `line` and prints the display. Returns `false` once
/// the user asked to quit.
fn process_line<H: Hook, W: Write>(
    calc: &mut Calculator<H>,
    line: &str,
    out: &mut W,
) -> io::Result<bool> {
    match line.trim() {
        "" => Ok(true),
        "exit" => Ok(false),
        words => {
            for word in words.split_whitespace() {
                feed(calc, word);
            }
            writeln!(out, "{}", calc.display())?;
            Ok(true)
        }
    }
}

/// Tab completion at the prompt offers nothing.
fn completer() -> BasicCompleter {
    BasicCompleter::new(Vec::<String>::new())
}

fn interactive<H: Hook, W: Write>(calc: &mut Calculator<H>, out: &mut W) -> io::Result<()> {
    let mut con = Context::new();
    let mut completer = completer();
    loop {
        let line = match con.read_line(Prompt::from(PROMPT), None, &mut completer) {
            Ok(line) => line,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        };
        if !process_line(calc, &line, out)? {
            break;
        }
        con.history.push(line.into())?;
    }
    Ok(())
}

fn piped<H: Hook, R: BufRead, W: Write>(
    calc: &mut Calculator<H>,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        if !process_line(calc, &line?, out)? {
            break;
        }
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> io::Result<()> {
    let stdout = stdout();
    let mut stdout = stdout.lock();
    let mut calc = Calculator::new();

    if let Some(tokens) = matches.values_of("tokens") {
        for token in tokens {
            feed(&mut calc, token);
        }
        writeln!(stdout, "{}", calc.display())?;
    } else if atty::is(atty::Stream::Stdin) {
        interactive(&mut calc, &mut stdout)?;
    } else {
        let stdin = stdin();
        piped(&mut calc, stdin.lock(), &mut stdout)?;
    }
    Ok(())
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let matches = App::new("deskcalc")
        .version(clap::crate_version!())
        .about("Keypad calculator: feeds tokens to the engine and prints the display")
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Raises log verbosity (repeat for more)"),
        )
        .arg(
            Arg::with_name("tokens")
                .multiple(true)
                .allow_hyphen_values(true)
                .help("Tokens to press, e.g. 9 √ + 1 ="),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));
    tracing::debug!("starting");

    let code = match run(&matches) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("deskcalc: {}", e);
            1
        }
    };
    exit(code)
}

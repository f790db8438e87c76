// Quill: lexer, parser and token/AST explorer for the Quill closure language

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser as ClapParser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, Level};

use quill::diagnostics::render_error;
use quill::parser::{outline, tokenize, Parser};
use quill::ui::App;

#[derive(ClapParser)]
#[command(name = "quill", version, about = "Lex and parse a Quill source file")]
struct Cli {
    /// Source file path
    file: PathBuf,

    /// Print every token, one per line
    #[arg(long)]
    tokens: bool,

    /// Print the AST outline
    #[arg(long)]
    ast: bool,

    /// Open the interactive token and AST explorer
    #[arg(long)]
    tui: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(cli.verbose))
        .with_ansi(false)
        .init();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", cli.file.display(), e);
            std::process::exit(1);
        }
    };

    info!(file = %cli.file.display(), "lexing");
    let stream = tokenize(&source);
    let tokens = stream.tokens().to_vec();

    if cli.tokens {
        for token in &tokens {
            println!(
                "{}:{}..{} {:?} {:?}",
                token.line,
                token.start,
                token.end,
                token.kind,
                token.text()
            );
        }
    }

    info!(tokens = tokens.len(), "parsing");
    let parsed = Parser::new(stream).parse_program();

    if cli.tui {
        return run_explorer(source, tokens, parsed);
    }

    let program = match parsed {
        Ok(program) => program,
        Err(err) => {
            render_error(&source, &err)?;
            std::process::exit(1);
        }
    };

    if cli.ast {
        for line in outline(&program) {
            println!("{}", line);
        }
    }

    println!(
        "parsed class {}: {} block elements",
        program.class_name,
        program.block.elems.len()
    );

    Ok(())
}

fn run_explorer(
    source: String,
    tokens: Vec<quill::parser::Token>,
    parsed: quill::parser::ParseResult<quill::parser::ast::Program>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, tokens, parsed);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

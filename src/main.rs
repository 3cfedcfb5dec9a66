// mb-script: expression front end with an interactive shell and a TUI inspector

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser as ClapParser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use mbscript::parser::Parser;
use mbscript::repl;
use mbscript::ui::App;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to parse. Starts the interactive shell when omitted.
    file: Option<PathBuf>,

    /// Open the token/tree inspector instead of printing the tree
    #[arg(long, requires = "file")]
    inspect: bool,

    /// Print the token stream before the tree
    #[arg(long, requires = "file")]
    tokens: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let Some(path) = args.file else {
        let stdout = io::stdout();
        let styled = stdout.is_terminal();
        repl::run(io::stdin().lock(), &mut stdout.lock(), styled)?;
        return Ok(());
    };

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    if args.inspect {
        return inspect(source);
    }

    let mut parser = Parser::new();
    if let Err(e) = parser.parse(&source) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if args.tokens {
        for token in parser.tokens() {
            println!("{}", token);
        }
        println!();
    }
    println!("{}", parser.render());

    Ok(())
}

fn inspect(source: String) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source);
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

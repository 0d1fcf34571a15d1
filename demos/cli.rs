use balance::{Operation, Session, Side, Target};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io::{BufRead, BufReader};

const HELP: &str = "commands:
  <equation>                        start again with a new equation
  add|sub|mul|div <term> [side]     side is one of both (default), left, right
  move <left|right> <n>[,<n>...]    move the n'th items across the =
  undo | redo | history";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let mut session = Session::new("2x + 3 = 7")?;
    println!("{}", HELP);
    println!("{}", session.equation());

    let stdin = std::io::stdin();

    for line in BufReader::new(stdin.lock()).lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Err(e) = execute(&mut session, line) {
            eprintln!("Unable to run \"{}\": {}", line, e);
            continue;
        }

        println!("{}", session.equation());
    }

    Ok(())
}

fn execute(
    session: &mut Session,
    line: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if line.contains('=') {
        session.load(line)?;
        return Ok(());
    }

    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        ["undo"] => {
            if !session.undo() {
                eprintln!("Nothing to undo");
            }
        },
        ["redo"] => {
            if !session.redo() {
                eprintln!("Nothing to redo");
            }
        },
        ["history"] => {
            let current = session.history().cursor();
            for (i, step) in session.steps().iter().enumerate() {
                let marker = if Some(i) == current { "*" } else { " " };
                println!(
                    "{} {}: {}",
                    marker,
                    step.description(),
                    step.equation()
                );
            }
        },
        ["move", side, positions] => {
            let from = match *side {
                "left" => Side::Left,
                "right" => Side::Right,
                other => return Err(format!("unknown side \"{}\"", other).into()),
            };
            let items = &session.equation().side(from).items;
            let mut ids = Vec::new();

            for position in positions.split(',') {
                let n: usize = position.parse()?;
                let item = n
                    .checked_sub(1)
                    .and_then(|index| items.get(index))
                    .ok_or_else(|| format!("there is no item {}", n))?;
                ids.push(item.id());
            }

            session.move_terms(&ids, from, from.opposite());
        },
        [kind, value] => {
            session.apply(Operation::new(kind.parse()?, *value, Target::Both))?;
        },
        [kind, value, target] => {
            session.apply(Operation::new(kind.parse()?, *value, target.parse()?))?;
        },
        _ => return Err(HELP.into()),
    }

    Ok(())
}

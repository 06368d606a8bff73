use std::io::{self, BufRead};

use netbdd::rebuild::Session;
use netbdd::reorder;
use netbdd::tree;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let mut source = String::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let done = line.trim_start().starts_with("endmodule");
        source.push_str(&line);
        source.push('\n');
        if done {
            break;
        }
    }

    let mut session = Session::new(source);
    let (root, _stats) = reorder::sift(&mut session);

    print!("{}", tree::tree_string(session.bdd(), session.order(), root));

    Ok(())
}

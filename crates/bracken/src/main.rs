mod logging;

use std::process::ExitCode;

use anyhow::{Context, bail};
use bracken_db::{Diagnostic, File, check_file};
use bracken_errors::Renderer;
use bracken_ide::{Analysis, FilePosition};
use bracken_tokenizer::BracketConfig;
use camino::Utf8PathBuf;
use clap::Parser;
use text_size::TextSize;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
enum Options {
    /// Print the token tree.
    Tree(Input),
    /// Report unmatched and unclosed brackets.
    Check(Input),
    /// Print the selection ranges around an offset, innermost first.
    Select {
        #[command(flatten)]
        input: Input,
        /// Byte offset into the file.
        #[arg(long)]
        offset: u32,
    },
    /// Print the bracket pair touching an offset.
    Match {
        #[command(flatten)]
        input: Input,
        /// Byte offset into the file.
        #[arg(long)]
        offset: u32,
    },
}

#[derive(clap::Args)]
struct Input {
    path: Utf8PathBuf,
    /// Bracket pair as "OPEN CLOSE"; defaults to (), {} and [].
    #[arg(long = "pair", value_name = "OPEN CLOSE", value_parser = parse_pair)]
    pairs: Vec<(String, String)>,
}

fn parse_pair(pair: &str) -> Result<(String, String), String> {
    match pair.split_whitespace().collect::<Vec<_>>()[..] {
        [open, close] => Ok((open.to_owned(), close.to_owned())),
        _ => Err(format!("expected `OPEN CLOSE`, got `{pair}`")),
    }
}

impl Input {
    fn brackets(&self) -> anyhow::Result<BracketConfig> {
        if self.pairs.is_empty() {
            return Ok(BracketConfig::default());
        }
        BracketConfig::new(self.pairs.iter().map(|(open, close)| (open.as_str(), close.as_str())))
            .context("invalid bracket pairs")
    }

    fn load(&self, analysis: &Analysis) -> anyhow::Result<File> {
        let brackets = self.brackets()?;
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read `{}`", self.path))?;
        tracing::debug!(path = %self.path, pairs = brackets.len(), "loaded file");
        Ok(File::new(analysis.db(), self.path.clone(), text, brackets))
    }
}

fn position(analysis: &Analysis, input: &Input, offset: u32) -> anyhow::Result<FilePosition> {
    let file = input.load(analysis)?;
    let offset = TextSize::from(offset);
    let len = TextSize::of(file.text(analysis.db()));
    if offset > len {
        bail!("offset {offset:?} is past the end of `{}` ({len:?} bytes)", input.path);
    }
    Ok(FilePosition { file, offset })
}

fn main() -> anyhow::Result<ExitCode> {
    logging::init()?;

    let analysis = Analysis::default();
    let db = analysis.db();

    match Options::parse() {
        Options::Tree(input) => {
            let file = input.load(&analysis)?;
            print!("{}", file.token_tree(db).debug_dump());
        }
        Options::Check(input) => {
            let file = input.load(&analysis)?;
            let diagnostics = check_file::accumulated::<Diagnostic>(db, file);

            let renderer = Renderer::styled();
            let path = file.path(db).as_str();
            let text = file.text(db);

            for diagnostic in &diagnostics {
                eprintln!("{}", diagnostic.render(&renderer, path, text));
            }

            if !diagnostics.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Options::Select { input, offset } => {
            let position = position(&analysis, &input, offset)?;
            let text = position.file.text(db);
            for range in analysis.selection_ranges(position) {
                println!("{range:?} {:?}", &text[range]);
            }
        }
        Options::Match { input, offset } => {
            let position = position(&analysis, &input, offset)?;
            match analysis.matching_brackets(position) {
                Some((open, close)) => println!("{open:?} {close:?}"),
                None => {
                    eprintln!("no matching bracket at offset {:?}", position.offset);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

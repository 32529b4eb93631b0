use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use jsonex::{Extractor, Rule, Slot, StrSlot};

/// 从 json 文件中逐字节提取指定路径上的值
#[derive(Parser)]
#[command(name = "extract_json")]
struct Args {
    /// json 文件路径
    file: PathBuf,

    /// 提取规则，形如 `int:a.b` , `float:x` , `str:a.c` , `bool:flag`
    #[arg(required = true)]
    rules: Vec<RuleSpec>,
}

#[derive(Clone, Copy)]
enum Kind {
    Int,
    Float,
    Str,
    Bool,
}

#[derive(Clone)]
struct RuleSpec {
    kind: Kind,
    path: String,
}

impl FromStr for RuleSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((kind, path)) = s.split_once(':') else {
            bail!("rule '{s}' should look like <kind>:<dotted.path>");
        };

        let kind = match kind {
            "int" => Kind::Int,
            "float" => Kind::Float,
            "str" => Kind::Str,
            "bool" => Kind::Bool,
            _ => bail!("unknown kind '{kind}', expected int, float, str or bool"),
        };

        Ok(RuleSpec {
            kind,
            path: path.to_string(),
        })
    }
}

/// 每条规则的输出位置
enum Output {
    Int(i64),
    Float(f64),
    Str(StrSlot),
    Bool(bool),
}

impl Output {
    fn new(kind: Kind) -> Self {
        match kind {
            Kind::Int => Output::Int(0),
            Kind::Float => Output::Float(0.0),
            Kind::Str => Output::Str(StrSlot::new()),
            Kind::Bool => Output::Bool(false),
        }
    }

    fn slot(&mut self) -> Slot<'_> {
        match self {
            Output::Int(v) => Slot::Integer(v),
            Output::Float(v) => Slot::Float(v),
            Output::Str(v) => Slot::Str(v),
            Output::Bool(v) => Slot::Bool(v),
        }
    }

    fn render(&self) -> String {
        match self {
            Output::Int(v) => v.to_string(),
            Output::Float(v) => v.to_string(),
            Output::Str(v) => format!("{:?}", String::from_utf8_lossy(v)),
            Output::Bool(v) => v.to_string(),
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut file = fs::File::open(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;

    let paths: Vec<Vec<&str>> = args
        .rules
        .iter()
        .map(|spec| spec.path.split('.').collect())
        .collect();
    let mut outputs: Vec<Output> = args.rules.iter().map(|spec| Output::new(spec.kind)).collect();

    let found: Vec<bool> = {
        let mut rules: Vec<Rule<'_>> = outputs
            .iter_mut()
            .zip(&paths)
            .map(|(output, path)| Rule::new(output.slot(), path))
            .collect();

        let mut extractor = Extractor::new(&mut rules);
        let mut buffer = [0u8; 4096];
        loop {
            let n = file.read(&mut buffer).context("failed to read input")?;
            if n == 0 {
                break;
            }
            extractor
                .feed_buf(&buffer[..n])
                .with_context(|| format!("bad json in {}", args.file.display()))?;
        }
        extractor
            .finish()
            .with_context(|| format!("bad json in {}", args.file.display()))?;
        info!(bytes = extractor.position(), "parsed");

        let found = extractor.rules().iter().map(Rule::found).collect();
        found
    };

    for ((spec, output), found) in args.rules.iter().zip(&outputs).zip(found) {
        if found {
            println!("{} = {}", spec.path, output.render());
        } else {
            println!("{} not found", spec.path);
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

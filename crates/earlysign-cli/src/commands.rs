use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use eyre::eyre;
use serde::Serialize;

use earlysign_core::models::answer::AnswerSet;
use earlysign_core::models::result::AssessmentResult;
use earlysign_core::models::risk::Recommendation;
use earlysign_core::models::tool::{ScreeningTool, ToolStatus};
use earlysign_instruments::Questionnaire;
use earlysign_instruments::clock::SystemClock;
use earlysign_instruments::error::AssessmentError;

use crate::cli::{Cli, Commands, ConfigCommand};
use crate::config::{self, ConfigSource, EarlysignConfig, LoadedConfig};
use crate::state::{self, AppState};

const BAR_WIDTH: usize = 20;

pub fn run(cli: Cli, loaded: LoadedConfig) -> eyre::Result<()> {
    if let Commands::Config(command) = &cli.command {
        return run_config(command, &loaded, &cli);
    }

    let state = AppState::new(&loaded.config, &cli)?;
    match cli.command {
        Commands::Questions => questions(&state),
        Commands::Assess { answers } => assess(&state, answers),
        Commands::Dashboard => dashboard(&state),
        Commands::Tools => tools(&state),
        Commands::RunTool { id } => run_tool(&state, &id),
        Commands::Config(_) => unreachable!("handled above"),
    }
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn questions(state: &AppState) -> eyre::Result<()> {
    let q = state.questionnaire.as_ref();
    if state.json {
        return print_json(&serde_json::json!({
            "id": q.id(),
            "name": q.name(),
            "questions": q.questions(),
            "options": q.options(),
            "maxScore": q.max_score(),
        }));
    }

    println!("{}\n", q.name());
    for question in q.questions() {
        println!("{:>2}. [{}] {}", question.id, question.category, question.text);
    }
    println!();
    let scale: Vec<String> = q
        .options()
        .iter()
        .map(|o| format!("{} ({})", o.value, o.score))
        .collect();
    println!("Answers: {}", scale.join(", "));
    Ok(())
}

fn assess(state: &AppState, answers: Option<Vec<String>>) -> eyre::Result<()> {
    let q = state.questionnaire.as_ref();
    let answers = match answers {
        Some(values) => collect_answers(q, &values)?,
        None => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            if state.json {
                prompt_answers(q, &mut input, &mut std::io::stderr())?
            } else {
                prompt_answers(q, &mut input, &mut std::io::stdout())?
            }
        }
    };

    let result = q.score(&answers, &SystemClock)?;
    state.store.save(&result)?;

    if state.json {
        print_json(&result)
    } else {
        println!("\nAssessment complete!\n");
        print!("{}", render_result(&result));
        Ok(())
    }
}

/// Record `values` against questions 0, 1, 2, ... in order.
pub fn collect_answers(
    q: &dyn Questionnaire,
    values: &[String],
) -> Result<AnswerSet, AssessmentError> {
    values
        .iter()
        .enumerate()
        .try_fold(AnswerSet::new(), |answers, (index, value)| {
            q.record_answer(&answers, index, value.trim())
        })
}

/// Map typed input to an option value: a 1-based option number or the value itself.
pub fn parse_choice(q: &dyn Questionnaire, input: &str) -> Option<String> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| q.options().get(i))
            .map(|o| o.value.clone());
    }
    let lowered = input.to_lowercase();
    q.options()
        .iter()
        .find(|o| o.value == lowered)
        .map(|o| o.value.clone())
}

/// Walk the questionnaire one question at a time.
///
/// `b` steps back, an empty line keeps an existing answer, `q` abandons.
pub fn prompt_answers<R: BufRead, W: Write>(
    q: &dyn Questionnaire,
    input: &mut R,
    output: &mut W,
) -> eyre::Result<AnswerSet> {
    let count = q.question_count();
    let mut answers = AnswerSet::new();
    let mut index = 0;
    let mut line = String::new();

    while index < count {
        let question = &q.questions()[index];
        writeln!(
            output,
            "\nQuestion {} of {} [{}]\n{}",
            index + 1,
            count,
            question.category,
            question.text
        )?;
        for (n, option) in q.options().iter().enumerate() {
            let marker = if answers.get(index) == Some(option.value.as_str()) {
                '*'
            } else {
                ' '
            };
            writeln!(output, " {marker}{}) {}", n + 1, option.label)?;
        }
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(eyre!("input ended before the assessment was complete"));
        }

        match line.trim() {
            "b" | "back" => {
                if index == 0 {
                    writeln!(output, "Already at the first question.")?;
                } else {
                    index -= 1;
                }
            }
            "q" | "quit" => return Err(eyre!("assessment abandoned")),
            "" if answers.contains(index) => index += 1,
            choice => match parse_choice(q, choice) {
                Some(value) => {
                    answers = q.record_answer(&answers, index, &value)?;
                    index += 1;
                }
                None => writeln!(
                    output,
                    "Please choose 1-{} or an option name.",
                    q.options().len()
                )?,
            },
        }
    }

    Ok(answers)
}

/// Text block for a stored result: tier, bar, score and advice.
pub fn render_result(result: &AssessmentResult) -> String {
    let filled = usize::from(result.risk_percentage.min(100)) * BAR_WIDTH / 100;
    let Recommendation { title, message } = result.risk_level.recommendation();
    format!(
        "{} Risk ({}%)\n[{}{}]\nBased on {} assessment score\nCompleted {}\n\n{}\n  {}\n",
        result.risk_level,
        result.risk_percentage,
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        result.score_fraction(),
        result.completed_at.strftime("%Y-%m-%d %H:%M UTC"),
        title,
        message,
    )
}

fn dashboard(state: &AppState) -> eyre::Result<()> {
    let result = state.store.load_for_display();

    if state.json {
        let recommendation = result.as_ref().map(|r| r.risk_level.recommendation());
        return print_json(&serde_json::json!({
            "result": result,
            "recommendation": recommendation,
        }));
    }

    match result {
        Some(result) => print!("{}", render_result(&result)),
        None => println!(
            "No assessment yet. Run `earlysign assess` to complete your first risk assessment."
        ),
    }
    Ok(())
}

#[derive(Serialize)]
struct ToolInfo {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    status: ToolStatus,
}

fn tools(state: &AppState) -> eyre::Result<()> {
    let infos: Vec<ToolInfo> = ScreeningTool::ALL
        .into_iter()
        .map(|tool| ToolInfo {
            id: tool.id(),
            title: tool.title(),
            description: tool.description(),
            status: tool.status(),
        })
        .collect();

    if state.json {
        return print_json(&infos);
    }

    for info in infos {
        let status = match info.status {
            ToolStatus::Available => "available",
            ToolStatus::Stub => "demo stub",
        };
        println!("{:<16} {:<18} {} ({status})", info.id, info.title, info.description);
    }
    Ok(())
}

fn run_tool(state: &AppState, id: &str) -> eyre::Result<()> {
    let tool: ScreeningTool = id.parse()?;
    tool.ensure_available()?;
    match tool {
        ScreeningTool::Questionnaire => assess(state, None),
        ScreeningTool::SpeechAnalysis | ScreeningTool::SignLanguage => {
            unreachable!("stub tools fail ensure_available")
        }
    }
}

/// What `config show` reports: the effective settings and where they came from.
#[derive(Debug, Serialize)]
pub struct ConfigReport<'a> {
    pub path: &'a Path,
    pub source: ConfigSource,
    pub data_dir: PathBuf,
    pub config: &'a EarlysignConfig,
}

/// Output of `config show`: one JSON object with `--json`, text otherwise.
pub fn render_config_show(loaded: &LoadedConfig, cli: &Cli) -> eyre::Result<String> {
    let report = ConfigReport {
        path: &loaded.path,
        source: loaded.source,
        data_dir: state::resolve_data_dir(&loaded.config, cli)?,
        config: &loaded.config,
    };

    if cli.json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let source = match report.source {
        ConfigSource::File => "on disk",
        ConfigSource::Defaults => "defaults",
    };
    Ok(format!(
        "config: {} ({source})\ndata dir: {}\nquestionnaire: {}\nlog format: {:?}\n\
         created: {}",
        report.path.display(),
        report.data_dir.display(),
        report.config.questionnaire,
        report.config.log_format,
        report.config.created_at,
    ))
}

/// Output of `config init` once the file is written.
pub fn render_config_init(path: &Path, json: bool) -> eyre::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "path": path,
            "written": true,
        }))?)
    } else {
        Ok(format!("wrote {}", path.display()))
    }
}

fn run_config(command: &ConfigCommand, loaded: &LoadedConfig, cli: &Cli) -> eyre::Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("{}", render_config_show(loaded, cli)?);
            Ok(())
        }
        ConfigCommand::Init { force } => {
            if config::has_config() && !force {
                return Err(eyre!(
                    "config already exists at {}; pass --force to overwrite",
                    config::config_path()?.display()
                ));
            }
            let path = config::save_config(&EarlysignConfig::new())?;
            println!("{}", render_config_init(&path, cli.json)?);
            Ok(())
        }
    }
}

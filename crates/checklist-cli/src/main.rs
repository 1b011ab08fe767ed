mod config;
mod wizard;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use checklist_export::{ExportFormat, export};
use checklist_spec::{
    ExportMode, ExportOptions, FormSnapshot, FormState, QuestionSpec, QuestionType, Template,
    TemplateRegistry, answer_text, build_public_view, build_render_payload, is_visible,
    render_json_ui, render_public_text, render_text, validate_snapshot, validate_template,
};
use checklist_store::{
    FormGateway, FormSession, JsonFileGateway, Route, SessionConfig, SessionMode,
};
use config::{Overrides, Settings};
use wizard::{AnswerParseError, PromptContext, Verbosity, WizardPresenter};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Disclosure checklist CLI",
    long_about = "Fill, render, export, store and publish disclosure checklists built from templates"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// TOML settings file (defaults to ./checklist.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory holding stored forms.
    #[arg(long, global = true, value_name = "DIR")]
    store_dir: Option<PathBuf>,
    /// Directory with additional template JSON files.
    #[arg(long, global = true, value_name = "DIR")]
    templates_dir: Option<PathBuf>,
    /// Directory with the TrueType fonts used for PDF export.
    #[arg(long, global = true, value_name = "DIR")]
    fonts_dir: Option<PathBuf>,
    /// Base URL that share links are built on.
    #[arg(long, global = true, value_name = "URL")]
    share_url: Option<String>,
    /// User id that owns saved forms.
    #[arg(long, global = true, value_name = "USER")]
    owner: Option<String>,
    /// Show debug logging and extra wizard detail.
    #[arg(long, short = 'v', global = true, alias = "debug")]
    verbose: bool,
}

#[derive(Args)]
struct SourceArgs {
    /// Snapshot JSON file.
    #[arg(long, value_name = "FILE", conflicts_with = "id", required_unless_present = "id")]
    snapshot: Option<PathBuf>,
    /// Id of a stored form.
    #[arg(long, value_name = "ID")]
    id: Option<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FileType {
    Pdf,
    Docx,
    Txt,
}

impl From<FileType> for ExportFormat {
    fn from(value: FileType) -> Self {
        match value {
            FileType::Pdf => ExportFormat::Pdf,
            FileType::Docx => ExportFormat::Docx,
            FileType::Txt => ExportFormat::Txt,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Layout {
    Detailed,
    Summary,
}

impl From<Layout> for ExportMode {
    fn from(value: Layout) -> Self {
        match value {
            Layout::Detailed => ExportMode::Detailed,
            Layout::Summary => ExportMode::Summary,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// List available templates.
    Templates,
    /// Check a template file for structural problems.
    Check {
        /// Path to the template JSON.
        #[arg(value_name = "TEMPLATE")]
        path: PathBuf,
    },
    /// Print the JSON Schema of template files.
    Schema,
    /// Fill a form interactively.
    Fill {
        /// Template id (defaults to the AI disclosure checklist).
        #[arg(long, value_name = "ID")]
        template: Option<String>,
        /// Form title.
        #[arg(long)]
        title: Option<String>,
        /// Snapshot JSON to continue from.
        #[arg(long, value_name = "FILE")]
        answers: Option<PathBuf>,
        /// Write the finished snapshot here instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Store the form for the configured owner instead of filling as a guest.
        #[arg(long)]
        save: bool,
    },
    /// Render the live form view.
    Render {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Report per-section completion.
    Status {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Validate answers against their template.
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Export a form as PDF, DOCX or plain text.
    Export {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value_t = FileType::Pdf)]
        format: FileType,
        #[arg(long, value_enum, default_value_t = Layout::Detailed)]
        mode: Layout,
        /// Leave out unanswered questions and empty sections.
        #[arg(long)]
        skip_empty: bool,
        /// Output directory.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Store a snapshot for the configured owner.
    Save {
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,
        /// Update this stored form instead of creating a new one.
        #[arg(long, value_name = "ID")]
        id: Option<String>,
    },
    /// List the owner's active forms, newest first.
    List,
    /// Publish a stored form and print its share link.
    Publish {
        #[arg(long, value_name = "ID")]
        id: String,
        /// Name shown on the public view.
        #[arg(long)]
        author: String,
    },
    /// Hide a published form; its link stays reserved.
    Unpublish {
        #[arg(long, value_name = "ID")]
        id: String,
    },
    /// Mark a stored form as submitted.
    Submit {
        #[arg(long, value_name = "ID")]
        id: String,
    },
    /// Delete a stored form.
    Delete {
        #[arg(long, value_name = "ID")]
        id: String,
    },
    /// Show a published form from its share link or public id.
    View {
        #[arg(value_name = "LINK")]
        link: String,
    },
}

struct App {
    settings: Settings,
    registry: TemplateRegistry,
    verbose: bool,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let overrides = Overrides {
        store_dir: cli.global.store_dir,
        fonts_dir: cli.global.fonts_dir,
        templates_dir: cli.global.templates_dir,
        share_base_url: cli.global.share_url,
        owner: cli.global.owner,
    };
    let settings = Settings::load(cli.global.config.as_deref(), overrides)?;
    let mut registry = TemplateRegistry::builtin()?;
    if let Some(dir) = &settings.templates_dir {
        let added = registry.load_dir(dir)?;
        debug!(dir = %dir.display(), added, "custom templates loaded");
    }
    let app = App {
        settings,
        registry,
        verbose: cli.global.verbose,
    };

    match cli.command {
        Command::Templates => run_templates(&app),
        Command::Check { path } => run_check(&path),
        Command::Schema => run_schema(),
        Command::Fill {
            template,
            title,
            answers,
            out,
            save,
        } => run_fill(&app, template, title, answers, out, save).await,
        Command::Render { source, format } => run_render(&app, &source, format).await,
        Command::Status { source } => run_status(&app, &source).await,
        Command::Validate { source } => run_validate(&app, &source).await,
        Command::Export {
            source,
            format,
            mode,
            skip_empty,
            out,
        } => run_export(&app, &source, format, mode, skip_empty, out).await,
        Command::Save { snapshot, id } => run_save(&app, &snapshot, id).await,
        Command::List => run_list(&app).await,
        Command::Publish { id, author } => run_publish(&app, &id, &author).await,
        Command::Unpublish { id } => run_unpublish(&app, &id).await,
        Command::Submit { id } => run_submit(&app, &id).await,
        Command::Delete { id } => run_delete(&app, &id).await,
        Command::View { link } => run_view(&app, &link).await,
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

impl App {
    fn owner(&self) -> CliResult<&str> {
        self.settings
            .owner
            .as_deref()
            .ok_or_else(|| "no owner configured; pass --owner or set CHECKLIST_OWNER".into())
    }

    async fn gateway(&self) -> CliResult<Arc<dyn FormGateway>> {
        let gateway = JsonFileGateway::open(&self.settings.store_dir).await?;
        Ok(Arc::new(gateway))
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            share_base_url: self.settings.share_base_url.clone(),
            ..SessionConfig::default()
        }
    }

    fn template(&self, template_id: &str) -> CliResult<Arc<Template>> {
        self.registry
            .get(template_id)
            .ok_or_else(|| format!("template '{}' is not available", template_id).into())
    }

    async fn snapshot(&self, source: &SourceArgs) -> CliResult<FormSnapshot> {
        match (&source.snapshot, &source.id) {
            (Some(path), _) => read_snapshot(path),
            (None, Some(id)) => {
                let record = self
                    .gateway()
                    .await?
                    .get(id)
                    .await?
                    .ok_or_else(|| format!("form '{}' not found", id))?;
                Ok(record.snapshot())
            }
            (None, None) => Err("either --snapshot or --id is required".into()),
        }
    }

    async fn form(&self, source: &SourceArgs) -> CliResult<FormState> {
        let snapshot = self.snapshot(source).await?;
        let template = self.template(&snapshot.template_id)?;
        Ok(FormState::from_snapshot(template, snapshot)?)
    }

    async fn session(&self, id: &str) -> CliResult<FormSession> {
        let gateway = self.gateway().await?;
        let record = gateway
            .get(id)
            .await?
            .ok_or_else(|| format!("form '{}' not found", id))?;
        let template = self.template(&record.template_id)?;
        Ok(FormSession::resume(
            record,
            template,
            gateway,
            self.session_config(),
        )?)
    }
}

fn read_snapshot(path: &Path) -> CliResult<FormSnapshot> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn run_templates(app: &App) -> CliResult<()> {
    for template in app.registry.list() {
        println!(
            "{}\t{} v{} ({} sections)",
            template.id,
            template.name,
            template.version,
            template.sections.len()
        );
    }
    Ok(())
}

fn run_check(path: &Path) -> CliResult<()> {
    let contents = fs::read_to_string(path)?;
    let template: Template = serde_json::from_str(&contents)?;
    let report = validate_template(&template);
    println!(
        "Template {}: {}",
        report.template_id,
        if report.valid { "valid" } else { "invalid" }
    );
    for error in &report.errors {
        println!(" - error [{}] {}", error.code, error.message);
    }
    for warning in &report.warnings {
        println!(" - warning [{}] {}", warning.code, warning.message);
    }
    if report.valid {
        Ok(())
    } else {
        Err(format!("template {} has {} error(s)", report.template_id, report.errors.len()).into())
    }
}

fn run_schema() -> CliResult<()> {
    let schema = schemars::schema_for!(Template);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

async fn run_fill(
    app: &App,
    template_id: Option<String>,
    title: Option<String>,
    answers: Option<PathBuf>,
    out: Option<PathBuf>,
    save: bool,
) -> CliResult<()> {
    let mut form = match &answers {
        Some(path) => {
            let snapshot = read_snapshot(path)?;
            let template = app.template(&snapshot.template_id)?;
            FormState::from_snapshot(template, snapshot)?
        }
        None => {
            let template = app
                .registry
                .get_or_default(template_id.as_deref())
                .ok_or("no template available")?;
            FormState::new(template, "Untitled Form")
        }
    };
    if let Some(title) = title {
        form.set_title(title);
    }
    let owner = if save { Some(app.owner()?.to_string()) } else { None };

    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(app.verbose));
    presenter.show_header(form.title(), &form.template().name, owner.is_none());
    fill_form(&mut form, &presenter)?;

    let missing = form
        .template()
        .grouped_sections()
        .map(|(_, section)| form.section_completion(&section.id))
        .collect::<Result<Vec<_>, _>>()?
        .iter()
        .map(|completion| completion.missing.len())
        .sum::<usize>();
    presenter.show_completion(missing == 0, missing);

    let json = serde_json::to_string_pretty(form.snapshot())?;
    if let Some(path) = &out {
        fs::write(path, &json)?;
        println!("Wrote {}", path.display());
    }

    match owner {
        Some(owner) => {
            let session = FormSession::new(
                form,
                SessionMode::Owner(owner),
                app.gateway().await?,
                app.session_config(),
            );
            let record = session.save_now().await?;
            println!("Saved form {} (revision {})", record.id, record.revision);
        }
        None if out.is_none() => println!("{}", json),
        None => {}
    }
    Ok(())
}

fn fill_form(form: &mut FormState, presenter: &WizardPresenter) -> CliResult<()> {
    let template = Arc::clone(form.template());
    for group in &template.section_groups {
        presenter.show_group(&group.title);
        for section in group
            .section_ids
            .iter()
            .filter_map(|id| template.section(id))
        {
            let progress = build_render_payload(&template, form.snapshot()).progress;
            presenter.show_section(section, &progress);

            let mut index = 0;
            loop {
                while index < form.instance_count(&section.id) {
                    if form.instance_count(&section.id) > 1 {
                        presenter.show_instance(&template.instance_label(index));
                    }
                    for (position, question) in section.questions.iter().enumerate() {
                        let instance = form
                            .instances(&section.id)
                            .get(index)
                            .cloned()
                            .unwrap_or_default();
                        if !is_visible(&template, &question.id, &instance) {
                            continue;
                        }
                        let number = template.question_number(position, question);
                        let prompt =
                            PromptContext::new(question, number, answer_text(&instance, &question.id));
                        if let Some(value) = prompt_question(&prompt, question, presenter)? {
                            form.set_answer(index, &section.id, &question.id, value)?;
                        }
                    }
                    index += 1;
                }
                let add_label = template.add_instance_label();
                if !prompt_bool(add_label.trim_start_matches('+').trim(), false)? {
                    break;
                }
                form.add_instance(&section.id)?;
            }
        }
    }
    Ok(())
}

/// `None` keeps the current answer.
fn prompt_question(
    prompt: &PromptContext,
    question: &QuestionSpec,
    presenter: &WizardPresenter,
) -> CliResult<Option<String>> {
    loop {
        presenter.show_prompt(prompt);
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }

        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return Err("wizard aborted by user".into());
        }
        if trimmed.is_empty() {
            return Ok(None);
        }

        match parse_answer(question, trimmed) {
            Ok(value) => return Ok(Some(value)),
            Err(err) => presenter.show_parse_error(&err),
        }
    }
}

fn parse_answer(question: &QuestionSpec, raw: &str) -> Result<String, AnswerParseError> {
    match question.kind {
        QuestionType::Text | QuestionType::Textarea => Ok(raw.to_string()),
        QuestionType::Radio => parse_option(question, raw),
        QuestionType::Checkbox => parse_checkbox(raw),
    }
}

fn parse_option(question: &QuestionSpec, raw: &str) -> Result<String, AnswerParseError> {
    let options = question.options.as_deref().unwrap_or_default();
    if let Ok(position) = raw.parse::<usize>()
        && let Some(option) = position.checked_sub(1).and_then(|index| options.get(index))
    {
        return Ok(option.clone());
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(raw))
        .cloned()
        .ok_or_else(|| {
            AnswerParseError::new(
                format!("'{}' is not one of the options.", raw),
                Some(options.join(", ")),
            )
        })
}

fn parse_checkbox(raw: &str) -> Result<String, AnswerParseError> {
    match raw.to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Ok("Yes".to_string()),
        "false" | "f" | "no" | "n" | "0" => Ok("No".to_string()),
        _ => Err(AnswerParseError::new(
            "Please answer yes or no.",
            Some("yes/no, y/n, true/false".into()),
        )),
    }
}

fn prompt_line(prompt: &str, default: Option<&str>) -> CliResult<String> {
    if let Some(default_value) = default {
        print!("{} [{}]: ", prompt, default_value);
    } else {
        print!("{}: ", prompt);
    }
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn prompt_bool(prompt: &str, default: bool) -> CliResult<bool> {
    let prompt_text = format!("{} (y/n)", prompt.trim());
    let default_hint = if default { "Y" } else { "N" };
    loop {
        let line = prompt_line(&prompt_text, Some(default_hint))?;
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => {
                println!("Invalid answer '{}'. Expected yes or no.", other);
            }
        }
    }
}

async fn run_render(app: &App, source: &SourceArgs, format: RenderMode) -> CliResult<()> {
    let form = app.form(source).await?;
    let payload = build_render_payload(form.template(), form.snapshot());
    match format {
        RenderMode::Text => println!("{}", render_text(&payload)),
        RenderMode::Json => println!(
            "{}",
            serde_json::to_string_pretty(&render_json_ui(&payload))?
        ),
    }
    Ok(())
}

async fn run_status(app: &App, source: &SourceArgs) -> CliResult<()> {
    let form = app.form(source).await?;
    let template = Arc::clone(form.template());
    let mut complete = true;
    for (_, section) in template.grouped_sections() {
        let completion = form.section_completion(&section.id)?;
        if completion.complete {
            println!("[x] {}", section.title.trim());
            continue;
        }
        complete = false;
        let missing = completion
            .missing
            .iter()
            .map(|missing| {
                if form.instance_count(&section.id) > 1 {
                    format!(
                        "{} ({})",
                        missing.question_id,
                        template.instance_label(missing.instance)
                    )
                } else {
                    missing.question_id.clone()
                }
            })
            .collect::<Vec<_>>();
        println!("[ ] {} (missing: {})", section.title.trim(), missing.join(", "));
    }
    println!(
        "Status: {}",
        if complete { "complete" } else { "need_input" }
    );
    Ok(())
}

async fn run_validate(app: &App, source: &SourceArgs) -> CliResult<()> {
    let snapshot = app.snapshot(source).await?;
    let template = app.template(&snapshot.template_id)?;
    let result = validate_snapshot(&template, &snapshot);
    println!(
        "Validation result: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    for error in &result.errors {
        println!(" - [{}] {}", error.code, error.message);
    }
    if !result.missing_required.is_empty() {
        println!("Missing required answers: {}", result.missing_required.len());
    }
    if !result.unknown_fields.is_empty() {
        println!("Unknown fields: {}", result.unknown_fields.join(", "));
    }
    if result.valid {
        Ok(())
    } else {
        Err("snapshot failed validation".into())
    }
}

async fn run_export(
    app: &App,
    source: &SourceArgs,
    format: FileType,
    mode: Layout,
    skip_empty: bool,
    out: Option<PathBuf>,
) -> CliResult<()> {
    let snapshot = app.snapshot(source).await?;
    let template = app.template(&snapshot.template_id)?;
    let options = ExportOptions {
        mode: mode.into(),
        include_empty: !skip_empty,
    };
    let document = export(
        format.into(),
        options,
        &template,
        &snapshot,
        &app.settings.export,
    )?;
    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)?;
    let path = dir.join(&document.file_name);
    fs::write(&path, &document.bytes)?;
    println!("Exported {}", path.display());
    Ok(())
}

async fn run_save(app: &App, snapshot_path: &Path, id: Option<String>) -> CliResult<()> {
    let owner = app.owner()?;
    let snapshot = read_snapshot(snapshot_path)?;
    let template = app.template(&snapshot.template_id)?;
    let gateway = app.gateway().await?;
    let session = match id {
        Some(id) => {
            let mut record = gateway
                .get(&id)
                .await?
                .ok_or_else(|| format!("form '{}' not found", id))?;
            record.title = snapshot.title;
            record.template_id = snapshot.template_id;
            record.form_data = snapshot.form_data;
            FormSession::resume(record, template, gateway, app.session_config())?
        }
        None => FormSession::new(
            FormState::from_snapshot(template, snapshot)?,
            SessionMode::Owner(owner.to_string()),
            gateway,
            app.session_config(),
        ),
    };
    let record = session.save_now().await?;
    println!("Saved form {} (revision {})", record.id, record.revision);
    Ok(())
}

async fn run_list(app: &App) -> CliResult<()> {
    let owner = app.owner()?;
    let forms = app.gateway().await?.list(owner).await?;
    if forms.is_empty() {
        println!("No active forms.");
    }
    for form in forms {
        let visibility = if form.is_public { "public" } else { "private" };
        println!(
            "{}\t{}\t{}\t{}\t{}",
            form.id,
            form.updated_at.format("%Y-%m-%d %H:%M"),
            visibility,
            form.template_id,
            form.title
        );
    }
    Ok(())
}

async fn run_publish(app: &App, id: &str, author: &str) -> CliResult<()> {
    let session = app.session(id).await?;
    let url = session.publish(author).await?;
    println!("Published: {}", url);
    Ok(())
}

async fn run_unpublish(app: &App, id: &str) -> CliResult<()> {
    let session = app.session(id).await?;
    session.unpublish().await?;
    println!("Unpublished form {}", id);
    Ok(())
}

async fn run_submit(app: &App, id: &str) -> CliResult<()> {
    let record = app.gateway().await?.submit(id).await?;
    println!("Submitted form {}", record.id);
    Ok(())
}

async fn run_delete(app: &App, id: &str) -> CliResult<()> {
    let session = app.session(id).await?;
    session.delete().await?;
    println!("Deleted form {}", id);
    Ok(())
}

/// Accepts a full share URL, a bare `#/view/<id>` hash or a public id.
fn public_id_from_link(link: &str) -> Option<String> {
    let link = link.trim();
    match link.split_once('#') {
        Some((_, hash)) => match Route::parse(hash) {
            Route::View { public_id } => Some(public_id),
            Route::Recovery | Route::Home => None,
        },
        None if !link.is_empty() && !link.contains('/') => Some(link.to_string()),
        None => None,
    }
}

async fn run_view(app: &App, link: &str) -> CliResult<()> {
    let public_id =
        public_id_from_link(link).ok_or_else(|| format!("'{}' is not a share link", link))?;
    let published = app
        .gateway()
        .await?
        .fetch_public(&public_id)
        .await?
        .ok_or("this form is not published or does not exist")?;
    let snapshot = published.snapshot();
    let template = app.template(&snapshot.template_id)?;
    let view = build_public_view(&template, &snapshot, published.author_name.as_deref());
    println!("{}", render_public_text(&view));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radio() -> QuestionSpec {
        QuestionSpec {
            id: "q8".into(),
            label: "Was the model fine-tuned?".into(),
            kind: QuestionType::Radio,
            placeholder: None,
            options: Some(vec!["Yes".into(), "No".into()]),
            tooltip: None,
            required: true,
        }
    }

    #[test]
    fn parse_answer_accepts_option_text_or_number() {
        let question = radio();
        assert_eq!(parse_answer(&question, "no").unwrap(), "No");
        assert_eq!(parse_answer(&question, "1").unwrap(), "Yes");
        assert!(parse_answer(&question, "3").is_err());
        assert!(parse_answer(&question, "maybe").is_err());
    }

    #[test]
    fn parse_answer_keeps_free_text() {
        let question = QuestionSpec {
            kind: QuestionType::Textarea,
            options: None,
            ..radio()
        };
        assert_eq!(
            parse_answer(&question, "Used to draft items").unwrap(),
            "Used to draft items"
        );
    }

    #[test]
    fn parse_checkbox_maps_yes_no() {
        assert_eq!(parse_checkbox("Y").unwrap(), "Yes");
        assert_eq!(parse_checkbox("0").unwrap(), "No");
        assert!(parse_checkbox("sometimes").is_err());
    }

    #[test]
    fn share_links_resolve_to_public_ids() {
        assert_eq!(
            public_id_from_link("https://forms.example.org/#/view/abc-123").as_deref(),
            Some("abc-123")
        );
        assert_eq!(public_id_from_link("abc-123").as_deref(), Some("abc-123"));
        assert_eq!(public_id_from_link("https://forms.example.org/#type=recovery"), None);
        assert_eq!(public_id_from_link("https://forms.example.org/"), None);
    }
}

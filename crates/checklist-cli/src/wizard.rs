use checklist_spec::{QuestionSpec, QuestionType, RenderProgress, SectionSpec};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question prompts only.
    Clean,
    /// Verbose output: progress, section summaries, tooltips.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints headings and prompts while the form is being filled.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            header_printed: false,
        }
    }

    pub fn show_header(&mut self, form_title: &str, template_name: &str, guest: bool) {
        if self.header_printed {
            return;
        }
        println!("Form: {} ({})", form_title, template_name);
        if guest {
            println!("Guest mode: answers are not saved unless written with --out.");
        }
        println!("Press enter to keep the current answer, type 'exit' to stop.");
        self.header_printed = true;
    }

    pub fn show_group(&self, title: &str) {
        if !title.trim().is_empty() {
            println!();
            println!("== {} ==", title.trim());
        }
    }

    pub fn show_section(&self, section: &SectionSpec, progress: &RenderProgress) {
        println!();
        println!("## {}", section.title.trim());
        if self.verbosity.is_verbose() {
            if !section.summary.trim().is_empty() {
                println!("{}", section.summary_preview());
            }
            println!("Progress: {}/{}", progress.answered, progress.total);
        }
    }

    pub fn show_instance(&self, label: &str) {
        println!("-- {} --", label);
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = format!("{}. {}", prompt.number, prompt.label);
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if self.verbosity.is_verbose() {
            if let Some(tooltip) = &prompt.tooltip {
                println!("Info: {}", tooltip);
            }
            if let Some(placeholder) = &prompt.placeholder {
                println!("e.g. {}", placeholder);
            }
        }
        if let Some(current) = &prompt.current {
            println!("Current: {}", current);
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if let Some(debug) = &error.debug_message {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_completion(&self, complete: bool, missing: usize) {
        if complete {
            println!("Done ✅ every required question is answered.");
        } else {
            println!("{} required answer(s) still missing.", missing);
        }
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub number: String,
    pub label: String,
    pub required: bool,
    pub hint: Option<String>,
    pub tooltip: Option<String>,
    pub placeholder: Option<String>,
    pub current: Option<String>,
}

impl PromptContext {
    pub fn new(question: &QuestionSpec, number: String, current: Option<&str>) -> Self {
        Self {
            number,
            label: question.label.trim().to_string(),
            required: question.required,
            hint: hint(question),
            tooltip: question.tooltip().map(str::to_string),
            placeholder: question
                .placeholder
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            current: current.map(str::to_string),
        }
    }
}

fn hint(question: &QuestionSpec) -> Option<String> {
    match question.kind {
        QuestionType::Radio => question
            .options
            .as_ref()
            .filter(|options| !options.is_empty())
            .map(|options| {
                let numbered = options
                    .iter()
                    .enumerate()
                    .map(|(index, option)| format!("{}={}", index + 1, option))
                    .collect::<Vec<_>>();
                format!("({})", numbered.join(", "))
            }),
        QuestionType::Checkbox => Some("(yes/no)".to_string()),
        QuestionType::Text | QuestionType::Textarea => None,
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

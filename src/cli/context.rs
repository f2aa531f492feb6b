use chrono::Local;
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use uuid::Uuid;

use crate::catalog::{default_catalog, CategoryId};
use crate::cli::{forms, output, views};
use crate::config::{Config, ConfigManager};
use crate::errors::ExpenseError;
use crate::records::{Expense, ExpensePatch, PaymentMethod, User};
use crate::report;
use crate::storage::{JsonFileStore, RecordStore};

/// How the shell consumes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] ExpenseError),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),
    #[error(transparent)]
    Core(#[from] ExpenseError),
}

/// Command table: name plus the help line shown by `help`.
pub(crate) const COMMANDS: &[(&str, &str)] = &[
    ("dashboard", "Spending overview for today and this month"),
    (
        "add",
        "Record an expense (form, or: add <amount> <category> <method> [date] [note..])",
    ),
    (
        "list",
        "List expenses grouped by day (list [cat:<category>] [text..])",
    ),
    ("edit", "Edit an expense (edit <id> [field value]..)"),
    ("delete", "Delete an expense (delete <id>)"),
    ("budgets", "Budget health for every category"),
    ("budget", "Set a monthly limit (budget [<category> <limit>])"),
    ("categories", "Show the category catalog"),
    ("login", "Sign in (login <email>)"),
    ("logout", "Clear the active session"),
    ("whoami", "Show the signed-in user"),
    ("help", "Show available commands"),
    ("exit", "Leave the shell"),
    ("quit", "Leave the shell"),
];

pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    store: RecordStore<JsonFileStore>,
    config: Config,
    user: Option<User>,
    theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let store = RecordStore::new(JsonFileStore::new_default()?);
        let config = ConfigManager::new_default()?.load()?;
        let user = store.load_user()?;
        Ok(Self {
            mode,
            running: true,
            store,
            config,
            user,
            theme: ColorfulTheme::default(),
        })
    }

    pub fn prompt(&self) -> String {
        String::from("expense> ")
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn command_names(&self) -> Vec<String> {
        COMMANDS.iter().map(|(name, _)| name.to_string()).collect()
    }

    pub fn report_error(&self, err: CommandError) {
        output::error(err);
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let confirmed = dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt("Exit the shell?")
            .default(true)
            .interact()?;
        Ok(confirmed)
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "help" => {
                views::render_help(COMMANDS);
                Ok(LoopControl::Continue)
            }
            "exit" | "quit" => Ok(LoopControl::Exit),
            "login" => {
                self.login(args)?;
                Ok(LoopControl::Continue)
            }
            "logout" => {
                self.logout();
                Ok(LoopControl::Continue)
            }
            "whoami" => {
                match &self.user {
                    Some(user) => output::info(format!("Signed in as {} ({}).", user.email, user.id)),
                    None => output::info("Not signed in."),
                }
                Ok(LoopControl::Continue)
            }
            "categories" => {
                views::render_catalog(default_catalog());
                Ok(LoopControl::Continue)
            }
            "dashboard" => {
                self.dashboard()?;
                Ok(LoopControl::Continue)
            }
            "add" => {
                self.add_expense(args)?;
                Ok(LoopControl::Continue)
            }
            "list" => {
                self.list_expenses(args)?;
                Ok(LoopControl::Continue)
            }
            "edit" => {
                self.edit_expense(args)?;
                Ok(LoopControl::Continue)
            }
            "delete" => {
                self.delete_expense(args)?;
                Ok(LoopControl::Continue)
            }
            "budget" => {
                self.set_budget(args)?;
                Ok(LoopControl::Continue)
            }
            "budgets" => {
                self.budgets()?;
                Ok(LoopControl::Continue)
            }
            unknown => {
                self.suggest_command(unknown);
                Err(CommandError::Invalid(format!(
                    "Unknown command `{unknown}`. Type `help` for the command list."
                )))
            }
        }
    }

    fn suggest_command(&self, input: &str) {
        let mut suggestions: Vec<(usize, &str)> = COMMANDS
            .iter()
            .map(|(name, _)| (levenshtein(name, input), *name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    fn require_user_id(&self) -> Result<Uuid, CommandError> {
        self.user.as_ref().map(|user| user.id).ok_or_else(|| {
            CommandError::Invalid("Sign in first with `login <email>`.".to_string())
        })
    }

    fn interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    fn login(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let email = match args.first() {
            Some(email) => email.trim().to_string(),
            None if self.interactive() => forms::login_form(&self.theme)?,
            None => {
                return Err(CommandError::Invalid(
                    "Usage: login <email>".to_string(),
                ))
            }
        };
        if email.is_empty() {
            return Err(CommandError::Invalid("Email must not be blank.".to_string()));
        }

        let user = User::new(email);
        self.store.save_user(&user)?;
        output::success(format!("Signed in as {}.", user.email));
        self.user = Some(user);
        Ok(())
    }

    fn logout(&mut self) {
        // Stored records stay; only the in-memory session is cleared.
        self.user = None;
        output::success("Signed out.");
    }

    fn dashboard(&self) -> Result<(), CommandError> {
        let user_id = self.require_user_id()?;
        let catalog = default_catalog();
        let expenses = self.store.expenses_for_user(user_id)?;
        let budgets = self.store.budgets_for_user(user_id)?;
        let reference = Local::now().date_naive();

        let summary = report::summarize(&expenses, reference, catalog);
        let alerts = report::budget_alerts(&budgets, &summary.category_spends, catalog);
        views::render_dashboard(&summary, &alerts, reference, self.config.currency_symbol());
        Ok(())
    }

    fn add_expense(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let user_id = self.require_user_id()?;
        let catalog = default_catalog();

        let draft = if args.is_empty() {
            if !self.interactive() {
                return Err(CommandError::Invalid(
                    "Usage: add <amount> <category> <method> [date] [note..]".to_string(),
                ));
            }
            forms::expense_form(&self.theme, catalog, None)?
        } else {
            forms::parse_expense_args(catalog, args)?
        };

        let mut expense = Expense::new(
            user_id,
            draft.date,
            draft.amount,
            draft.payment_method,
            draft.category_id,
        );
        if let Some(note) = draft.note {
            expense = expense.with_note(note);
        }
        self.store.add_expense(expense)?;
        output::success("Expense added.");
        Ok(())
    }

    fn list_expenses(&self, args: &[&str]) -> Result<(), CommandError> {
        let user_id = self.require_user_id()?;
        let catalog = default_catalog();

        let mut category: Option<CategoryId> = None;
        let mut terms: Vec<&str> = Vec::new();
        for arg in args.iter().copied() {
            if let Some(key) = arg.strip_prefix("cat:") {
                let matched = catalog.resolve(key).ok_or_else(|| {
                    CommandError::Invalid(format!("Unknown category `{key}`."))
                })?;
                category = Some(matched.id.clone());
            } else {
                terms.push(arg);
            }
        }
        let term = terms.join(" ");

        let expenses = self.store.expenses_for_user(user_id)?;
        let filtered: Vec<Expense> = expenses
            .into_iter()
            .filter(|expense| {
                expense.matches_search(&term)
                    && category
                        .as_ref()
                        .map_or(true, |wanted| &expense.category_id == wanted)
            })
            .collect();

        views::render_expense_list(
            &filtered,
            Local::now().date_naive(),
            catalog,
            self.config.currency_symbol(),
        );
        Ok(())
    }

    fn edit_expense(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let user_id = self.require_user_id()?;
        let catalog = default_catalog();
        let token = args.first().copied().ok_or_else(|| {
            CommandError::Invalid("Usage: edit <id> [field value]..".to_string())
        })?;
        let existing = self.find_expense(user_id, token)?;

        let patch = if args.len() > 1 {
            forms::parse_patch_args(catalog, &args[1..])?
        } else {
            if !self.interactive() {
                return Err(CommandError::Invalid(
                    "Usage: edit <id> <field> <value> [<field> <value>]..".to_string(),
                ));
            }
            let draft = forms::expense_form(&self.theme, catalog, Some(&existing))?;
            ExpensePatch {
                date: Some(draft.date),
                amount: Some(draft.amount),
                payment_method: Some(draft.payment_method),
                category_id: Some(draft.category_id),
                note: Some(draft.note),
            }
        };
        if patch.is_empty() {
            output::warning("Nothing to change.");
            return Ok(());
        }

        if self.store.update_expense(existing.id, &patch)? {
            output::success("Expense updated.");
        } else {
            output::warning("Expense vanished before the update was applied.");
        }
        Ok(())
    }

    fn delete_expense(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let user_id = self.require_user_id()?;
        let token = args
            .first()
            .copied()
            .ok_or_else(|| CommandError::Invalid("Usage: delete <id>".to_string()))?;
        let existing = self.find_expense(user_id, token)?;

        if self.interactive() {
            let confirmed = dialoguer::Confirm::with_theme(&self.theme)
                .with_prompt(format!(
                    "Delete the {} expense from {}?",
                    views::format_amount(self.config.currency_symbol(), existing.amount),
                    existing.date
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                output::info("Kept the expense.");
                return Ok(());
            }
        }

        if self.store.remove_expense(existing.id)? {
            output::success("Expense deleted.");
        } else {
            output::warning("Expense was already gone.");
        }
        Ok(())
    }

    fn set_budget(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let user_id = self.require_user_id()?;
        let catalog = default_catalog();

        let (category_id, limit) = match args {
            [] if self.interactive() => forms::budget_form(&self.theme, catalog)?,
            [category, limit] => {
                let matched = catalog.resolve(category).ok_or_else(|| {
                    CommandError::Invalid(format!("Unknown category `{category}`."))
                })?;
                (matched.id.clone(), forms::parse_amount(limit)?)
            }
            _ => {
                return Err(CommandError::Invalid(
                    "Usage: budget <category> <limit>".to_string(),
                ))
            }
        };

        let budget = self.store.set_budget(user_id, category_id, limit)?;
        let name = catalog
            .get(&budget.category_id)
            .map(|category| category.name.clone())
            .unwrap_or_else(|| budget.category_id.to_string());
        output::success(format!(
            "Budget for {} set to {}.",
            name,
            views::format_amount(self.config.currency_symbol(), budget.monthly_limit)
        ));
        Ok(())
    }

    fn budgets(&self) -> Result<(), CommandError> {
        let user_id = self.require_user_id()?;
        let catalog = default_catalog();
        let expenses = self.store.expenses_for_user(user_id)?;
        let budgets = self.store.budgets_for_user(user_id)?;
        let reference = Local::now().date_naive();

        let summary = report::summarize(&expenses, reference, catalog);
        let statuses = report::evaluate_budgets(&budgets, &summary.category_spends, catalog);
        views::render_budgets(&statuses, catalog, self.config.currency_symbol());
        Ok(())
    }

    /// Resolve an expense of this user by full id or unambiguous id prefix.
    fn find_expense(&self, user_id: Uuid, token: &str) -> Result<Expense, CommandError> {
        let expenses = self.store.expenses_for_user(user_id)?;
        let matches: Vec<&Expense> = expenses
            .iter()
            .filter(|expense| expense.id.to_string().starts_with(token))
            .collect();
        match matches.as_slice() {
            [] => Err(CommandError::Invalid(format!(
                "No expense matches id `{token}`."
            ))),
            [single] => Ok((*single).clone()),
            _ => Err(CommandError::Invalid(format!(
                "Id prefix `{token}` is ambiguous."
            ))),
        }
    }
}

/// Payment-method parse helper shared with the forms module.
pub(crate) fn parse_payment_method(value: &str) -> Result<PaymentMethod, CommandError> {
    PaymentMethod::parse(value).ok_or_else(|| {
        CommandError::Invalid(format!(
            "Unknown payment method `{value}` (expected UPI, Wallet, Cash, or Card)."
        ))
    })
}

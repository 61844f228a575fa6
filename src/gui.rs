use iced::widget::{
    rule, Button, Column, Container, Row, Scrollable, Space, Text, TextInput,
};
use iced::{Alignment, Background, Border, Color, Element, Length, Task};

use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use student_manager::config::AppConfig;
use student_manager::credentials::CredentialStore;
use student_manager::models::{StudentForm, StudentRecord};
use student_manager::records::RecordStore;
use student_manager::session::Session;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

/// What the side form panel is currently doing.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Hidden,
    Add,
    Update(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    // login screen
    LoginUsernameChanged(String),
    LoginPasswordChanged(String),
    LoginPressed,
    ToggleRegister,
    RegisterUsernameChanged(String),
    RegisterPasswordChanged(String),
    RegisterPressed,
    Quit,

    // dashboard
    AddPressed,
    UpdatePressed,
    DeletePressed,
    DeleteConfirmed(String, bool),
    RefreshPressed,
    SearchChanged(String),
    SearchPressed,
    RowSelected(String),
    FormNameChanged(String),
    FormGradeChanged(String),
    FormSubjectChanged(String),
    FormMarkChanged(String),
    FormSubmit,
    FormCancel,

    DialogClosed,
    ToggleTheme,
}

pub struct StudentApp {
    records: RecordStore,
    credentials: CredentialStore,
    session: Session,

    // login screen state
    login_username: String,
    login_password: String,
    show_register: bool,
    register_username: String,
    register_password: String,

    // dashboard state
    selected: Option<String>,
    highlighted: Vec<String>,
    search_query: String,
    form_mode: FormMode,
    form: StudentForm,
    status_message: String,
    theme: Theme,
}

impl StudentApp {
    pub fn new(config: AppConfig) -> (Self, Task<Message>) {
        let records = config.open_records();
        let mut credentials = config.open_credentials();
        let mut status_message = String::new();
        if let Err(e) = credentials.ensure_default_account() {
            status_message = format!("Could not write {}: {}", credentials.path().display(), e);
        }
        (
            StudentApp {
                records,
                credentials,
                session: Session::default(),
                login_username: String::new(),
                login_password: String::new(),
                show_register: false,
                register_username: String::new(),
                register_password: String::new(),
                selected: None,
                highlighted: Vec::new(),
                search_query: String::new(),
                form_mode: FormMode::Hidden,
                form: StudentForm::default(),
                status_message,
                theme: Theme::Light,
            },
            Task::none(),
        )
    }

    pub fn title(&self) -> String {
        match self.session.username() {
            Some(user) => format!("Student Management System - {}", user),
            None => "Login".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoginUsernameChanged(s) => self.login_username = s,
            Message::LoginPasswordChanged(s) => self.login_password = s,
            Message::LoginPressed => {
                let result = self.session.login(
                    &mut self.credentials,
                    &self.login_username,
                    &self.login_password,
                );
                return match result {
                    Ok(()) => {
                        self.login_password.clear();
                        self.status_message.clear();
                        notify(MessageLevel::Info, "Success", "Logged in".to_string())
                    }
                    Err(e) => notify(MessageLevel::Error, "Error", e.to_string()),
                };
            }
            Message::ToggleRegister => {
                self.show_register = !self.show_register;
            }
            Message::RegisterUsernameChanged(s) => self.register_username = s,
            Message::RegisterPasswordChanged(s) => self.register_password = s,
            Message::RegisterPressed => {
                return match self
                    .credentials
                    .register(&self.register_username, &self.register_password)
                {
                    Ok(()) => {
                        self.show_register = false;
                        self.register_username.clear();
                        self.register_password.clear();
                        notify(MessageLevel::Info, "Success", "User created".to_string())
                    }
                    Err(e) => notify(MessageLevel::Error, "Error", e.to_string()),
                };
            }
            Message::Quit => return iced::exit(),

            Message::AddPressed => {
                self.form = StudentForm::default();
                self.form_mode = FormMode::Add;
            }
            Message::UpdatePressed => {
                let Some(id) = self.selected.clone() else {
                    return notify(
                        MessageLevel::Info,
                        "Select",
                        "Please select a student row first".to_string(),
                    );
                };
                if let Some(record) = self.records.get(&id) {
                    self.form = StudentForm::from(record);
                    self.form_mode = FormMode::Update(id);
                }
            }
            Message::DeletePressed => {
                let Some(id) = self.selected.clone() else {
                    return notify(MessageLevel::Info, "Select", "Please select a student".to_string());
                };
                let Some(record) = self.records.get(&id) else {
                    return Task::none();
                };
                let question = format!("Delete student {}?", record.name);
                return Task::perform(
                    async move {
                        let answer = AsyncMessageDialog::new()
                            .set_level(MessageLevel::Warning)
                            .set_title("Confirm Delete")
                            .set_description(question)
                            .set_buttons(MessageButtons::YesNo)
                            .show()
                            .await;
                        matches!(answer, MessageDialogResult::Yes)
                    },
                    move |confirmed| Message::DeleteConfirmed(id.clone(), confirmed),
                );
            }
            Message::DeleteConfirmed(id, confirmed) => {
                if !confirmed {
                    return Task::none();
                }
                return match self.records.delete(&id) {
                    Ok(_) => {
                        self.selected = None;
                        self.highlighted.retain(|h| h != &id);
                        if self.form_mode == FormMode::Update(id) {
                            self.form_mode = FormMode::Hidden;
                        }
                        notify(MessageLevel::Info, "Deleted", "Student deleted successfully!".to_string())
                    }
                    Err(e) => notify(MessageLevel::Error, "Error", e.to_string()),
                };
            }
            Message::RefreshPressed => {
                self.records.reload();
                self.highlighted.clear();
                if let Some(id) = &self.selected {
                    if self.records.get(id).is_none() {
                        self.selected = None;
                    }
                }
            }
            Message::SearchChanged(s) => self.search_query = s,
            Message::SearchPressed => {
                if self.search_query.is_empty() {
                    return Task::none();
                }
                let matches = self.records.search_by_name(&self.search_query);
                debug!(query = %self.search_query, hits = matches.len(), "search");
                if matches.is_empty() {
                    self.highlighted.clear();
                    return notify(MessageLevel::Info, "Search", "No results found".to_string());
                }
                self.selected = matches.first().cloned();
                self.highlighted = matches;
            }
            Message::RowSelected(id) => {
                self.selected = Some(id);
            }
            Message::FormNameChanged(s) => self.form.name = s,
            Message::FormGradeChanged(s) => self.form.grade = s,
            Message::FormSubjectChanged(s) => self.form.subject = s,
            Message::FormMarkChanged(s) => self.form.mark = s,
            Message::FormSubmit => {
                return match self.form_mode.clone() {
                    FormMode::Hidden => Task::none(),
                    FormMode::Add => match self.records.add(&self.form) {
                        Ok(record) => {
                            self.form_mode = FormMode::Hidden;
                            self.selected = Some(record.id.clone());
                            notify(
                                MessageLevel::Info,
                                "Success",
                                format!("Student added: {}", record.id),
                            )
                        }
                        Err(e) => notify(MessageLevel::Error, "Error", e.to_string()),
                    },
                    FormMode::Update(id) => match self.records.update(&id, &self.form) {
                        Ok(_) => {
                            self.form_mode = FormMode::Hidden;
                            notify(MessageLevel::Info, "Updated", "Student updated successfully!".to_string())
                        }
                        Err(e) => notify(MessageLevel::Error, "Error", e.to_string()),
                    },
                };
            }
            Message::FormCancel => {
                self.form_mode = FormMode::Hidden;
            }
            Message::DialogClosed => {}
            Message::ToggleTheme => {
                self.theme = match self.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                };
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = if self.session.is_logged_in() {
            self.view_dashboard()
        } else {
            self.view_login()
        };

        let bg_color = self.bg_color();
        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| {
                iced::widget::container::Style {
                    background: Some(Background::Color(bg_color)),
                    border: Border::default(),
                    ..Default::default()
                }
            })
            .into()
    }

    fn view_login(&self) -> Element<'_, Message> {
        let accent = self.accent_color();
        let secondary_text = self.secondary_text_color();

        let title = Text::new("Student Management System")
            .size(28)
            .style(move |_theme| iced::widget::text::Style { color: Some(accent) });

        let subtitle = Text::new("Sign in to continue")
            .size(14)
            .style(move |_theme| iced::widget::text::Style { color: Some(secondary_text) });

        let username = TextInput::new("Username", &self.login_username)
            .on_input(Message::LoginUsernameChanged)
            .on_submit(Message::LoginPressed)
            .padding(10)
            .width(Length::Fixed(280.0));

        let password = TextInput::new("Password", &self.login_password)
            .on_input(Message::LoginPasswordChanged)
            .on_submit(Message::LoginPressed)
            .secure(true)
            .padding(10)
            .width(Length::Fixed(280.0));

        let buttons = Row::new()
            .spacing(10)
            .push(Button::new(Text::new("Login").size(14)).on_press(Message::LoginPressed).padding(10))
            .push(
                Button::new(Text::new(if self.show_register { "Hide Register" } else { "Register" }).size(14))
                    .on_press(Message::ToggleRegister)
                    .padding(10),
            )
            .push(Button::new(Text::new("Quit").size(14)).on_press(Message::Quit).padding(10));

        let mut content = Column::new()
            .padding(40)
            .spacing(15)
            .align_x(Alignment::Center)
            .push(title)
            .push(subtitle)
            .push(Space::with_height(10))
            .push(username)
            .push(password)
            .push(buttons);

        if self.show_register {
            content = content
                .push(Space::with_height(10))
                .push(rule::Rule::horizontal(1))
                .push(self.view_register());
        }

        if !self.status_message.is_empty() {
            content = content.push(self.view_status());
        }

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn view_register(&self) -> Element<'_, Message> {
        let text_color = self.text_color();

        Column::new()
            .spacing(10)
            .align_x(Alignment::Center)
            .push(
                Text::new("Register")
                    .size(18)
                    .style(move |_theme| iced::widget::text::Style { color: Some(text_color) }),
            )
            .push(
                TextInput::new("New username", &self.register_username)
                    .on_input(Message::RegisterUsernameChanged)
                    .padding(10)
                    .width(Length::Fixed(280.0)),
            )
            .push(
                TextInput::new("New password", &self.register_password)
                    .on_input(Message::RegisterPasswordChanged)
                    .on_submit(Message::RegisterPressed)
                    .secure(true)
                    .padding(10)
                    .width(Length::Fixed(280.0)),
            )
            .push(Button::new(Text::new("Create Account").size(14)).on_press(Message::RegisterPressed).padding(10))
            .into()
    }

    fn view_dashboard(&self) -> Element<'_, Message> {
        let toolbar = Row::new()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(toolbar_button("Add", Message::AddPressed))
            .push(toolbar_button("Update", Message::UpdatePressed))
            .push(toolbar_button("Delete", Message::DeletePressed))
            .push(toolbar_button("Refresh", Message::RefreshPressed))
            .push(Space::with_width(20))
            .push(
                TextInput::new("Search by name", &self.search_query)
                    .on_input(Message::SearchChanged)
                    .on_submit(Message::SearchPressed)
                    .padding(8)
                    .width(Length::Fixed(220.0)),
            )
            .push(toolbar_button("Search", Message::SearchPressed))
            .push(Space::with_width(Length::Fill))
            .push(toolbar_button(
                match self.theme {
                    Theme::Light => "Dark Mode",
                    Theme::Dark => "Light Mode",
                },
                Message::ToggleTheme,
            ));

        let mut body = Row::new().spacing(15).push(self.view_table());
        if self.form_mode != FormMode::Hidden {
            body = body.push(rule::Rule::vertical(1)).push(self.view_form());
        }

        let mut content = Column::new()
            .padding(10)
            .spacing(10)
            .push(toolbar)
            .push(rule::Rule::horizontal(1))
            .push(Container::new(body).height(Length::Fill))
            .push(rule::Rule::horizontal(1))
            .push(self.view_summary());

        if !self.status_message.is_empty() {
            content = content.push(self.view_status());
        }

        content.into()
    }

    fn view_table(&self) -> Element<'_, Message> {
        let header_color = self.secondary_text_color();
        let header = table_row(
            ["ID", "NAME", "GRADE", "SUBJECT", "MARK"].map(String::from),
            header_color,
        );

        let mut rows = Column::new().spacing(2);
        for record in self.records.records() {
            rows = rows.push(self.view_row(record));
        }
        if self.records.is_empty() {
            let tertiary = self.tertiary_text_color();
            rows = rows.push(
                Text::new("No students yet")
                    .size(14)
                    .style(move |_theme| iced::widget::text::Style { color: Some(tertiary) }),
            );
        }

        Column::new()
            .spacing(6)
            .width(Length::Fill)
            .push(header)
            .push(rule::Rule::horizontal(1))
            .push(Scrollable::new(rows).height(Length::Fill))
            .into()
    }

    fn view_row<'a>(&self, record: &'a StudentRecord) -> Element<'a, Message> {
        let is_selected = self.selected.as_deref() == Some(record.id.as_str());
        let is_highlighted = self.highlighted.iter().any(|id| id == &record.id);

        let background = if is_selected {
            Some(Background::Color(self.accent_color()))
        } else if is_highlighted {
            Some(Background::Color(self.highlight_color()))
        } else {
            None
        };
        let text_color = if is_selected { Color::WHITE } else { self.text_color() };

        let cells = table_row(
            [
                record.id.clone(),
                record.name.clone(),
                record.grade.clone(),
                record.subject.clone(),
                record.mark.to_string(),
            ],
            text_color,
        );

        Button::new(cells)
            .on_press(Message::RowSelected(record.id.clone()))
            .padding(6)
            .width(Length::Fill)
            .style(move |_theme, _status| iced::widget::button::Style {
                background,
                text_color,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 4.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn view_form(&self) -> Element<'_, Message> {
        let text_color = self.text_color();
        let (title, submit) = match &self.form_mode {
            FormMode::Update(id) => (format!("Update Student {}", id), "Update"),
            _ => ("Add Student".to_string(), "Save"),
        };

        let buttons = Row::new()
            .spacing(10)
            .push(Button::new(Text::new(submit).size(14)).on_press(Message::FormSubmit).padding(10))
            .push(Button::new(Text::new("Cancel").size(14)).on_press(Message::FormCancel).padding(10));

        Column::new()
            .padding(10)
            .spacing(12)
            .width(Length::Fixed(280.0))
            .push(
                Text::new(title)
                    .size(18)
                    .style(move |_theme| iced::widget::text::Style { color: Some(text_color) }),
            )
            .push(self.form_field("Name", &self.form.name, Message::FormNameChanged))
            .push(self.form_field("Grade", &self.form.grade, Message::FormGradeChanged))
            .push(self.form_field("Subject", &self.form.subject, Message::FormSubjectChanged))
            .push(self.form_field("Mark (0-100)", &self.form.mark, Message::FormMarkChanged))
            .push(buttons)
            .into()
    }

    fn form_field<'a>(
        &self,
        label: &'static str,
        value: &'a str,
        on_input: fn(String) -> Message,
    ) -> Column<'a, Message> {
        let text_color = self.text_color();
        Column::new()
            .spacing(4)
            .push(
                Text::new(label)
                    .size(13)
                    .style(move |_theme| iced::widget::text::Style { color: Some(text_color) }),
            )
            .push(
                TextInput::new(label, value)
                    .on_input(on_input)
                    .on_submit(Message::FormSubmit)
                    .padding(8),
            )
    }

    fn view_summary(&self) -> Element<'_, Message> {
        let summary = self.records.summary();
        let text_color = self.text_color();
        let label = move |s: String| {
            Text::new(s)
                .size(15)
                .style(move |_theme| iced::widget::text::Style { color: Some(text_color) })
        };

        Row::new()
            .spacing(25)
            .padding(5)
            .push(label(format!("Count: {}", summary.count)))
            .push(label(format!("Avg: {}", summary.average_label())))
            .push(label(format!("High: {}", summary.max)))
            .push(label(format!("Low: {}", summary.min)))
            .into()
    }

    fn view_status(&self) -> Element<'_, Message> {
        Text::new(&self.status_message)
            .size(12)
            .style(|_theme| iced::widget::text::Style {
                color: Some(Color::from_rgb(0.9, 0.2, 0.2)),
            })
            .into()
    }

    // Theme color helpers
    fn bg_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(1.0, 1.0, 1.0),
            Theme::Dark => Color::from_rgb(0.11, 0.11, 0.13),
        }
    }

    fn text_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.1, 0.1, 0.1),
            Theme::Dark => Color::from_rgb(0.9, 0.9, 0.9),
        }
    }

    fn secondary_text_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.4, 0.4, 0.4),
            Theme::Dark => Color::from_rgb(0.6, 0.6, 0.6),
        }
    }

    fn tertiary_text_color(&self) -> Color {
        Color::from_rgb(0.5, 0.5, 0.5)
    }

    fn highlight_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.85, 0.92, 1.0),
            Theme::Dark => Color::from_rgb(0.2, 0.26, 0.35),
        }
    }

    fn accent_color(&self) -> Color {
        Color::from_rgb(0.2, 0.5, 0.8)
    }
}

fn toolbar_button(label: &str, message: Message) -> Button<'_, Message> {
    Button::new(Text::new(label).size(14)).on_press(message).padding(8)
}

fn table_row<'a>(cells: [String; 5], color: Color) -> Row<'a, Message> {
    let widths = [80.0, 220.0, 100.0, 160.0, 60.0];
    let mut row = Row::new().spacing(10);
    for (cell, width) in cells.into_iter().zip(widths) {
        row = row.push(
            Text::new(cell)
                .size(14)
                .width(Length::Fixed(width))
                .style(move |_theme| iced::widget::text::Style { color: Some(color) }),
        );
    }
    row
}

/// Shows an information or error box without blocking the update loop.
fn notify(level: MessageLevel, title: &'static str, body: String) -> Task<Message> {
    Task::perform(
        async move {
            AsyncMessageDialog::new()
                .set_level(level)
                .set_title(title)
                .set_description(body)
                .set_buttons(MessageButtons::Ok)
                .show()
                .await;
        },
        |_| Message::DialogClosed,
    )
}

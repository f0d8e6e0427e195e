use std::path::PathBuf;

use bytes::Bytes;
use clap::{Args, Parser, Subcommand};
use hr_partner_client::config::Config;
use hr_partner_client::dto::candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload};
use hr_partner_client::dto::vacancy_dto::{
    CreateVacancyPayload, GenerateVacancyPayload, ImportSource, UpdateVacancyPayload,
};
use hr_partner_client::models::candidate::Candidate;
use hr_partner_client::models::matching::{MatchRecord, MatchResult};
use hr_partner_client::models::vacancy::Vacancy;
use hr_partner_client::services::matching_service::{ResumeSource, VacancySource};
use hr_partner_client::utils::normalize::{
    normalize_education, normalize_salary_range, normalize_skills, normalize_status_label,
};
use hr_partner_client::utils::score::{color_band, format_percent, verdict_band};
use hr_partner_client::ClientState;

#[derive(Parser)]
#[command(name = "hr-partner", about = "Клиент HR Partner: вакансии, кандидаты и сопоставление резюме")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Войти и сохранить сессию
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Завершить сессию
    Logout,
    /// Зарегистрировать пользователя (без автоматического входа)
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Показать текущего пользователя
    Whoami,
    /// Операции с вакансиями
    Vacancies {
        #[command(subcommand)]
        action: VacancyCommand,
    },
    /// Операции с кандидатами
    Candidates {
        #[command(subcommand)]
        action: CandidateCommand,
    },
    /// Сопоставить резюме и вакансию
    Match(MatchArgs),
    /// История сопоставлений
    History {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Последние сопоставления
    Recent,
    /// Показать сохранённое сопоставление по ID
    ShowMatch { id: i64 },
}

#[derive(Subcommand)]
enum VacancyCommand {
    /// Список вакансий с фильтром
    List {
        #[arg(long, default_value = "")]
        query: String,
        /// 0 — все, 1 — активные, 2 — закрытые
        #[arg(long, default_value_t = 0)]
        tab: usize,
    },
    /// Создать вакансию
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Навыки через запятую
        #[arg(long, default_value = "")]
        skills: String,
    },
    /// Показать вакансию
    Show { id: i64 },
    /// Обновить поля вакансии
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Навыки через запятую
        #[arg(long)]
        skills: Option<String>,
    },
    /// Удалить вакансию
    Delete { id: i64 },
    /// Дублировать вакансию
    Duplicate { id: i64 },
    /// Сменить статус (active / closed)
    SetStatus { id: i64, status: String },
    /// Импортировать вакансию с джоб-борда
    Import {
        #[arg(long)]
        source: ImportSource,
        #[arg(long)]
        url: String,
    },
    /// Сгенерировать вакансию с помощью ИИ
    Generate {
        #[arg(long)]
        position: String,
        #[arg(long)]
        company: String,
        /// Навыки через запятую
        #[arg(long)]
        skills: String,
        #[arg(long)]
        experience_years: i32,
        #[arg(long)]
        location: String,
        #[arg(long)]
        salary_range: Option<String>,
        #[arg(long)]
        company_description: Option<String>,
        #[arg(long)]
        additional_info: Option<String>,
    },
    /// Счётчики для дашборда
    Stats,
}

#[derive(Subcommand)]
enum CandidateCommand {
    /// Список кандидатов с фильтром
    List {
        #[arg(long, default_value = "")]
        query: String,
        /// 0 — все, n — id статуса кандидата
        #[arg(long, default_value_t = 0)]
        tab: usize,
    },
    /// Показать кандидата
    Show { id: i64 },
    /// Создать кандидата вручную
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        salary: Option<String>,
        /// Навыки через запятую
        #[arg(long, default_value = "")]
        skills: String,
    },
    /// Обновить поля кандидата
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Импортировать кандидата из файла резюме
    Import {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        email: String,
    },
    /// Сменить статус кандидата
    SetStatus { resume_id: i64, status_id: i64 },
    /// Доступные статусы кандидатов
    Statuses,
    /// Удалить кандидата
    Delete { id: i64 },
}

#[derive(Args)]
struct MatchArgs {
    /// Путь к файлу резюме (PDF/DOC)
    #[arg(long, group = "resume")]
    resume_file: Option<PathBuf>,
    /// Email владельца резюме (для файлового режима)
    #[arg(long)]
    email: Option<String>,
    /// Ссылка на резюме hh.ru
    #[arg(long, group = "resume")]
    resume_url: Option<String>,
    /// Текст резюме
    #[arg(long, group = "resume")]
    resume_text: Option<String>,
    /// ID сохранённого резюме
    #[arg(long, group = "resume")]
    resume_id: Option<i64>,

    /// Ссылка на вакансию hh.ru
    #[arg(long, group = "vacancy")]
    vacancy_url: Option<String>,
    /// Текст вакансии
    #[arg(long, group = "vacancy")]
    vacancy_text: Option<String>,
    /// ID сохранённой вакансии
    #[arg(long, group = "vacancy")]
    vacancy_id: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let state = ClientState::new(&config)?;

    match cli.command {
        Command::Login { email, password } => {
            let session = state.auth_service.login(&email, &password).await?;
            println!("Вход выполнен: {}", session.user.display_name());
        }
        Command::Logout => {
            state.auth_service.logout();
            println!("Сессия завершена");
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let user = state
                .auth_service
                .register(name.as_deref(), &email, &password)
                .await?;
            println!("Пользователь зарегистрирован: {}", user.display_name());
            println!("Теперь выполните вход: hr-partner login --email {}", email);
        }
        Command::Whoami => match state.auth_service.current_session() {
            Some(session) => println!("{}", session.user.display_name()),
            None => println!("Вы не авторизованы"),
        },
        Command::Vacancies { action } => run_vacancy_command(&state, action).await?,
        Command::Candidates { action } => run_candidate_command(&state, action).await?,
        Command::Match(args) => {
            let (resume, vacancy) = build_match_sources(args).await?;
            let result = state.matching_service.perform_match(resume, vacancy).await?;
            print_match_result(&result);
        }
        Command::History { page, limit } => {
            let records = state.matching_service.fetch_history(page, limit).await?;
            if records.is_empty() {
                println!("История пуста");
            }
            for record in records {
                print_match_record(&record);
            }
        }
        Command::Recent => {
            let records = state.matching_service.fetch_recent().await?;
            if records.is_empty() {
                println!("Сопоставлений ещё не было");
            }
            for record in records {
                print_match_record(&record);
            }
        }
        Command::ShowMatch { id } => {
            let result = state.matching_service.fetch_match_by_id(id).await?;
            print_match_result(&result);
        }
    }

    Ok(())
}

async fn run_vacancy_command(state: &ClientState, action: VacancyCommand) -> anyhow::Result<()> {
    let service = &state.vacancy_service;
    match action {
        VacancyCommand::List { query, tab } => {
            service.load().await?;
            let filtered = service.filtered(&query, tab);
            if filtered.is_empty() {
                println!("Вакансии не найдены");
            }
            for vacancy in filtered {
                print_vacancy(&vacancy);
            }
        }
        VacancyCommand::Create {
            title,
            company,
            location,
            description,
            skills,
        } => {
            let payload = CreateVacancyPayload {
                title,
                company,
                location,
                description,
                skills: split_skills(&skills),
                ..CreateVacancyPayload::default()
            };
            let list = service.create(&payload).await?;
            println!("Вакансия создана, всего вакансий: {}", list.len());
        }
        VacancyCommand::Show { id } => {
            let vacancy = service.get(id).await?;
            print_vacancy(&vacancy);
            if let Some(description) = &vacancy.description {
                println!("    Описание: {}", description);
            }
        }
        VacancyCommand::Update {
            id,
            title,
            company,
            location,
            description,
            skills,
        } => {
            let payload = UpdateVacancyPayload {
                title,
                company,
                location,
                description,
                skills: skills.as_deref().map(split_skills),
                ..UpdateVacancyPayload::default()
            };
            service.update(id, &payload).await?;
            println!("Вакансия обновлена");
        }
        VacancyCommand::Delete { id } => {
            let list = service.delete(id).await?;
            println!("Вакансия удалена, осталось: {}", list.len());
        }
        VacancyCommand::Duplicate { id } => {
            service.load().await?;
            let vacancy = service
                .items()
                .into_iter()
                .find(|v| v.id == id)
                .ok_or_else(|| anyhow::anyhow!("вакансия {} не найдена", id))?;
            service.duplicate(&vacancy).await?;
            println!("Вакансия дублирована");
        }
        VacancyCommand::SetStatus { id, status } => {
            service.load().await?;
            service.set_status(id, &status).await?;
            println!("Статус обновлён: {}", normalize_status_label(&status));
        }
        VacancyCommand::Import { source, url } => {
            let list = service.import(source, &url).await?;
            println!("Вакансия импортирована, всего вакансий: {}", list.len());
        }
        VacancyCommand::Generate {
            position,
            company,
            skills,
            experience_years,
            location,
            salary_range,
            company_description,
            additional_info,
        } => {
            let brief = GenerateVacancyPayload {
                position,
                company,
                required_skills: split_skills(&skills),
                experience_years,
                location,
                salary_range,
                company_description,
                additional_info,
            };
            let vacancy = service.generate(&brief).await?;
            println!("Сгенерирована вакансия:");
            print_vacancy(&vacancy);
        }
        VacancyCommand::Stats => {
            let stats = service.stats().await?;
            println!("Всего вакансий:      {}", stats.total_vacancies.unwrap_or(0));
            println!("Активных вакансий:   {}", stats.active_vacancies.unwrap_or(0));
            println!("Всего кандидатов:    {}", stats.total_candidates.unwrap_or(0));
            println!(
                "Сильных совпадений:  {}",
                stats.high_score_candidates.unwrap_or(0)
            );
            println!("Сопоставлений сегодня: {}", stats.matches_today.unwrap_or(0));
        }
    }
    Ok(())
}

async fn run_candidate_command(state: &ClientState, action: CandidateCommand) -> anyhow::Result<()> {
    let service = &state.candidate_service;
    match action {
        CandidateCommand::List { query, tab } => {
            service.load().await?;
            let filtered = service.filtered(&query, tab);
            if filtered.is_empty() {
                println!("Кандидаты не найдены");
            }
            for candidate in filtered {
                print_candidate(&candidate);
            }
        }
        CandidateCommand::Show { id } => {
            let candidate = service.get(id).await?;
            print_candidate(&candidate);
        }
        CandidateCommand::Create {
            name,
            email,
            phone,
            role,
            salary,
            skills,
        } => {
            let payload = CreateCandidatePayload {
                name,
                email,
                phone,
                role,
                salary,
                skills: split_skills(&skills),
                ..CreateCandidatePayload::default()
            };
            let list = service.create(&payload).await?;
            println!("Кандидат создан, всего кандидатов: {}", list.len());
        }
        CandidateCommand::Update {
            id,
            name,
            email,
            phone,
            role,
        } => {
            let payload = UpdateCandidatePayload {
                name,
                email,
                phone,
                role,
                ..UpdateCandidatePayload::default()
            };
            service.update(id, &payload).await?;
            println!("Кандидат обновлён");
        }
        CandidateCommand::Import { file, email } => {
            let content = tokio::fs::read(&file).await?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("resume.pdf")
                .to_string();
            let list = service
                .import(&file_name, Bytes::from(content), &email)
                .await?;
            println!("Резюме загружено, всего кандидатов: {}", list.len());
        }
        CandidateCommand::SetStatus {
            resume_id,
            status_id,
        } => {
            service.set_status(resume_id, status_id).await?;
            println!("Статус кандидата обновлён");
        }
        CandidateCommand::Statuses => {
            for status in service.statuses().await? {
                println!("{:>3}  {}", status.id, status.title);
            }
        }
        CandidateCommand::Delete { id } => {
            let list = service.delete(id).await?;
            println!("Кандидат удалён, осталось: {}", list.len());
        }
    }
    Ok(())
}

async fn build_match_sources(args: MatchArgs) -> anyhow::Result<(ResumeSource, VacancySource)> {
    let resume = if let Some(path) = args.resume_file {
        let content = tokio::fs::read(&path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf")
            .to_string();
        ResumeSource::File {
            content: Bytes::from(content),
            file_name,
            email: args.email.unwrap_or_default(),
        }
    } else if let Some(url) = args.resume_url {
        ResumeSource::Url(url)
    } else if let Some(text) = args.resume_text {
        ResumeSource::Text(text)
    } else if let Some(id) = args.resume_id {
        ResumeSource::Record(id)
    } else {
        anyhow::bail!("укажите источник резюме: --resume-file, --resume-url, --resume-text или --resume-id");
    };

    let vacancy = if let Some(url) = args.vacancy_url {
        VacancySource::Url(url)
    } else if let Some(text) = args.vacancy_text {
        VacancySource::Text(text)
    } else if let Some(id) = args.vacancy_id {
        VacancySource::Record(id)
    } else {
        anyhow::bail!("укажите источник вакансии: --vacancy-url, --vacancy-text или --vacancy-id");
    };

    Ok((resume, vacancy))
}

fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn print_vacancy(vacancy: &Vacancy) {
    let status = vacancy
        .status
        .as_deref()
        .map(normalize_status_label)
        .unwrap_or_else(|| "Неизвестно".to_string());
    println!("#{} {} [{}]", vacancy.id, vacancy.title, status);
    if let Some(company) = &vacancy.company {
        println!("    Компания: {}", company);
    }
    if let Some(location) = &vacancy.location {
        println!("    Город: {}", location);
    }
    println!(
        "    Зарплата: {}",
        normalize_salary_range(
            vacancy.salary_from.as_ref(),
            vacancy.salary_to.as_ref(),
            vacancy.currency.as_deref(),
        )
    );
    let skills = vacancy
        .skills
        .as_ref()
        .map(normalize_skills)
        .unwrap_or_default();
    if !skills.is_empty() {
        println!("    Навыки: {}", skills.join(", "));
    }
}

fn print_candidate(candidate: &Candidate) {
    let status = candidate
        .display_status()
        .unwrap_or_else(|| "Без статуса".to_string());
    println!("#{} {} [{}]", candidate.id, candidate.name, status);
    if let Some(role) = &candidate.role {
        println!("    Должность: {}", role);
    }
    println!(
        "    Образование: {}",
        normalize_education(candidate.education.as_ref())
    );
    let skills = candidate.skills_union();
    if !skills.is_empty() {
        println!("    Навыки: {}", skills.join(", "));
    }
    for experience in &candidate.work_experience {
        println!(
            "    Опыт: {} ({})",
            experience.company_name.as_deref().unwrap_or("—"),
            experience.period()
        );
    }
}

fn print_match_result(result: &MatchResult) {
    let band = verdict_band(result.score);
    println!(
        "Оценка соответствия: {} — {} (цвет {})",
        format_percent(result.score),
        band.display_label(),
        color_band(result.score).hex()
    );
    if let Some(verdict) = &result.verdict {
        println!("Вердикт: {}", verdict);
    }
    if !result.matched_skills.is_empty() {
        println!("Совпадающие навыки: {}", result.matched_skills.join(", "));
    }
    if !result.unmatched_skills.is_empty() {
        println!("Отсутствующие навыки: {}", result.unmatched_skills.join(", "));
    }
    for positive in &result.positives {
        println!("  + {}", positive);
    }
    for negative in &result.negatives {
        println!("  - {}", negative);
    }
    if let Some(comment) = &result.llm_comment {
        println!("Комментарий ИИ: {}", comment);
    }
    if !result.clarifying_questions.is_empty() {
        println!("Вопросы кандидату:");
        for question in &result.clarifying_questions {
            println!("  ? {}", question);
        }
    }
}

fn print_match_record(record: &MatchRecord) {
    let score = record
        .score
        .map(format_percent)
        .unwrap_or_else(|| "—".to_string());
    println!(
        "#{} резюме {} / вакансия {} — {}",
        record.id,
        record.resume_id.map_or("—".to_string(), |id| id.to_string()),
        record.vacancy_id.map_or("—".to_string(), |id| id.to_string()),
        score
    );
}

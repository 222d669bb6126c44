//!
//! HexaBid shell binary
//! --------------------
//! Interactive front end for the HexaBid backend API. Plays the role of the
//! application shell: restores the session from the persisted token on
//! startup, gates every view behind the route guard, and renders page data
//! as ASCII tables. In REPL mode, supports `login`/`logout` and `open <path>`
//! navigation with guard redirects printed and followed.

use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use hexabid::api::{auth, ApiClient};
use hexabid::cli::render_table;
use hexabid::config::{ClientConfig, BACKEND_URL_VAR, STATE_DIR_VAR};
use hexabid::pages::{
    AdminPage, AnalyticsPage, ChatPage, CrmPage, DashboardPage, DocumentsPage, Notice,
    NoticeLevel, Notices, NotificationsPage, ReportsPage, Speaker, SubscriptionPage,
    SupportPage, TenderDetailPage, TendersPage,
};
use hexabid::routing::{decide_route, RouteDecision, DASHBOARD_PATH, LOGIN_PATH};
use hexabid::session::{FileTokenStore, Role, SessionState, SessionStore};
use hexabid::tools::bidmath;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--backend <url>] [--state-dir <path>] [--open <path>]\n\nFlags:\n  --backend <url>      Backend base address (default: ${BACKEND_URL_VAR} or http://127.0.0.1:8000)\n  --state-dir <path>   Durable client state directory (default: ${STATE_DIR_VAR} or .hexabid)\n  --open <path>        Navigate to a path once before entering the prompt\n  -h, --help           Show this help\n\nInteractive commands:\n  open <path>                      navigate (guard redirects are followed)\n  login <email> <password>         sign in and persist the session\n  register <email> <password> <role> <full name...>   create an account\n  chat <message>                   ask the AI assistant (requires session)\n  whoami                           show the signed-in user\n  status                           show session state and backend address\n  logout                           drop the session\n  help                             show this help\n  quit | exit                      leave the shell\n\nPaths:\n  /dashboard /tenders /tenders/<id> /crm /reports /chat /documents\n  /notifications /support /subscription /analytics /admin"
    );
}

fn main() -> Result<()> {
    println!(
        r"   _   _           ____  _     _
  | | | | _____  _| __ )(_) __| |
  | |_| |/ _ \ \/ /  _ \| |/ _` |
  |  _  |  __/>  <| |_) | | (_| |
  |_| |_|\___/_/\_\____/|_|\__,_|
        Tender Intelligence Shell"
    );
    // Init logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .unwrap();
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut backend: Option<String> = None;
    let mut state_dir: Option<String> = None;
    let mut open_path: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--backend" => {
                if i + 1 >= args.len() { eprintln!("--backend requires a value"); print_usage(&program); std::process::exit(2); }
                backend = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--state-dir" => {
                if i + 1 >= args.len() { eprintln!("--state-dir requires a value"); print_usage(&program); std::process::exit(2); }
                state_dir = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--open" => {
                if i + 1 >= args.len() { eprintln!("--open requires a path"); print_usage(&program); std::process::exit(2); }
                open_path = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            unk => {
                eprintln!("Unrecognized argument: {}", unk);
                print_usage(&program);
                std::process::exit(2);
            }
        }
    }

    // Flags override environment; environment overrides defaults.
    let mut config = ClientConfig::from_env();
    if let Some(b) = backend { config.backend_url = b; }
    if let Some(d) = state_dir { config.state_dir = d.into(); }

    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "hexabid",
        "HexaBid shell starting: RUST_LOG='{}', backend='{}', state_dir='{}'",
        rust_log, config.backend_url, config.state_dir.display()
    );

    let storage = FileTokenStore::new(&config.state_dir);
    let session = Arc::new(SessionStore::new(Box::new(storage)));
    let api = ApiClient::new(&config, session.clone())
        .context("failed to construct API client")?;

    // Tokio runtime
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    // Restore the session exactly once before any routing happens.
    rt.block_on(session.restore(&api));
    match session.state() {
        SessionState::Authenticated => {
            if let Some(u) = session.user() {
                println!("Welcome back, {} <{}>", u.full_name, u.email);
            }
        }
        _ => println!("Not signed in. Use: login <email> <password>"),
    }

    let mut shell = Shell { rt, api, session, chat: ChatPage::new(), backend: config.backend_url.clone() };

    if let Some(path) = open_path {
        shell.navigate(&path);
    }

    // Prompt loop
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();
    println!("hexabid shell. Type 'help' for commands.");
    loop {
        input.clear();
        print!("> "); let _ = stdout.flush();
        if stdin.read_line(&mut input).is_err() { break; }
        let line = input.trim();
        if line.is_empty() { continue; }
        let up = line.to_uppercase();
        if up == "EXIT" || up == "QUIT" { break; }
        if up == "HELP" { print_usage(&program); continue; }
        if up == "WHOAMI" { shell.whoami(); continue; }
        if up == "STATUS" { shell.status(); continue; }
        if up == "LOGOUT" {
            shell.session.logout();
            println!("signed out");
            continue;
        }
        if let Some(rest) = strip_command(line, "open") {
            shell.navigate(rest.trim());
            continue;
        }
        if let Some(rest) = strip_command(line, "login") {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() != 2 { eprintln!("usage: login <email> <password>"); continue; }
            shell.login(parts[0], parts[1]);
            continue;
        }
        if let Some(rest) = strip_command(line, "register") {
            let parts: Vec<&str> = rest.splitn(4, ' ').collect();
            if parts.len() < 4 { eprintln!("usage: register <email> <password> <role> <full name>"); continue; }
            shell.register(parts[0], parts[1], parts[2], parts[3]);
            continue;
        }
        if let Some(rest) = strip_command(line, "chat") {
            shell.chat(rest.trim());
            continue;
        }
        eprintln!("unknown command: {} (try 'help')", line);
    }
    Ok(())
}

/// Map a role argument to a known role. Unknown strings are rejected rather
/// than silently registering the user under a default role.
fn parse_role(s: &str) -> Option<Role> {
    match serde_json::from_value::<Role>(serde_json::Value::String(s.to_string())) {
        Ok(Role::Unknown) | Err(_) => None,
        Ok(r) => Some(r),
    }
}

fn strip_command<'a>(line: &'a str, cmd: &str) -> Option<&'a str> {
    let lower = line.to_lowercase();
    if lower == cmd {
        Some("")
    } else if lower.starts_with(cmd) && line[cmd.len()..].starts_with(' ') {
        Some(&line[cmd.len() + 1..])
    } else {
        None
    }
}

struct Shell {
    rt: tokio::runtime::Runtime,
    api: ApiClient,
    session: Arc<SessionStore>,
    chat: ChatPage,
    backend: String,
}

impl Shell {
    fn whoami(&self) {
        match self.session.user() {
            Some(u) => println!("{} <{}> role={}", u.full_name, u.email, u.role.as_str()),
            None => println!("anonymous"),
        }
    }

    fn status(&self) {
        let state = match self.session.state() {
            SessionState::Loading => "loading",
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticated => "authenticated",
        };
        println!("backend: {}\nsession: {}", self.backend, state);
    }

    fn login(&mut self, email: &str, password: &str) {
        let req = auth::LoginRequest { email: email.to_string(), password: password.to_string() };
        match self.rt.block_on(auth::login(&self.api, &req)) {
            Ok(resp) => {
                self.session.login(&resp.access_token, resp.user);
                self.whoami();
                self.navigate(DASHBOARD_PATH);
            }
            Err(e) => {
                tracing::warn!(target: "hexabid", "login failed: {}", e);
                eprintln!("Login failed. Check your credentials and try again.");
            }
        }
    }

    fn register(&mut self, email: &str, password: &str, role: &str, full_name: &str) {
        let Some(role) = parse_role(role) else {
            eprintln!(
                "unknown role '{}'; valid roles: contractor, vendor, oem, consultant, super_admin",
                role
            );
            return;
        };
        let req = auth::RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
            company_name: None,
            role,
        };
        match self.rt.block_on(auth::register(&self.api, &req)) {
            Ok(resp) => {
                self.session.login(&resp.access_token, resp.user);
                self.whoami();
                self.navigate(DASHBOARD_PATH);
            }
            Err(e) => {
                tracing::warn!(target: "hexabid", "registration failed: {}", e);
                eprintln!("Registration failed.");
            }
        }
    }

    fn chat(&mut self, message: &str) {
        if self.session.state() != SessionState::Authenticated {
            eprintln!("sign in first: login <email> <password>");
            return;
        }
        if message.is_empty() { eprintln!("usage: chat <message>"); return; }
        self.rt.block_on(self.chat.send(&self.api, message));
        for turn in self.chat.transcript().iter().rev().take(2).rev() {
            let who = match turn.speaker { Speaker::You => "you", Speaker::Assistant => "assistant" };
            println!("[{}] {}", who, turn.text);
        }
        print_notices(&self.chat.notices);
    }

    /// Run the route guard for the requested path and render the outcome,
    /// following redirects until a view renders.
    fn navigate(&mut self, path: &str) {
        let mut current = path.to_string();
        loop {
            match decide_route(self.session.state(), &current) {
                RouteDecision::Placeholder => {
                    println!("Loading...");
                    return;
                }
                RouteDecision::Redirect(to) => {
                    println!("-> {}", to);
                    current = to;
                }
                RouteDecision::Render(p) => {
                    self.render(&p);
                    return;
                }
            }
        }
    }

    fn render(&mut self, path: &str) {
        if path == LOGIN_PATH {
            println!("== Sign in ==\nUse: login <email> <password>  or  register <email> <password> <role> <full name>");
            return;
        }
        if let Some(id) = path.strip_prefix("/tenders/") {
            self.render_tender_detail(id);
            return;
        }
        match path {
            "/dashboard" => self.render_dashboard(),
            "/tenders" => self.render_tenders(),
            "/crm" => self.render_crm(),
            "/reports" => self.render_reports(),
            "/chat" => self.render_chat(),
            "/documents" => self.render_documents(),
            "/notifications" => self.render_notifications(),
            "/support" => self.render_support(),
            "/subscription" => self.render_subscription(),
            "/analytics" => self.render_analytics(),
            "/admin" => self.render_admin(),
            // the guard only renders the paths enumerated above
            _ => {}
        }
    }

    fn render_dashboard(&mut self) {
        let page = DashboardPage::new();
        self.rt.block_on(page.load(&self.api));
        println!("== Dashboard ==");
        if let Some(s) = page.stats.ready() {
            let rows = vec![vec![
                s.total_tenders.to_string(),
                s.my_bids.to_string(),
                format!("{:.1}%", s.win_rate),
                s.this_month_bids.to_string(),
                bidmath::format_inr(s.estimated_value),
            ]];
            print_table(&["tenders", "my bids", "win rate", "this month", "est. value"], rows);
        }
        print_notices(&page.notices);
    }

    fn render_tenders(&mut self) {
        let page = TendersPage::new();
        self.rt.block_on(page.load(&self.api));
        println!("== Tenders ==");
        let now = chrono::Utc::now();
        let rows: Vec<Vec<String>> = page
            .rows()
            .iter()
            .map(|t| {
                let days = t
                    .submission_deadline
                    .map(|d| {
                        let left = bidmath::days_left(d, now);
                        if left > 0 { format!("{} days left", left) } else { "Expired".to_string() }
                    })
                    .unwrap_or_default();
                vec![
                    t.id.clone(),
                    t.title.clone(),
                    t.organization.clone(),
                    bidmath::format_inr(t.estimated_value),
                    bidmath::format_inr(t.emd_amount),
                    days,
                ]
            })
            .collect();
        print_table(&["id", "title", "organization", "value", "EMD", "deadline"], rows);
        print_notices(&page.notices);
    }

    fn render_tender_detail(&mut self, id: &str) {
        let page = TenderDetailPage::new(id);
        self.rt.block_on(page.load(&self.api));
        println!("== Tender {} ==", id);
        if let Some(t) = page.tender.ready() {
            println!("{} — {}", t.title, t.organization);
            println!("value: {}  EMD: {}", bidmath::format_inr(t.estimated_value), bidmath::format_inr(t.emd_amount));
            if !t.description.is_empty() { println!("{}", t.description); }
        }
        if let Some(Some(a)) = page.analysis.ready() {
            println!("-- analysis --\n{}", a.ai_summary);
        }
        print_notices(&page.notices);
    }

    fn render_crm(&mut self) {
        let page = CrmPage::new();
        self.rt.block_on(page.load(&self.api));
        println!("== CRM Contacts ==");
        let rows: Vec<Vec<String>> = page
            .rows()
            .iter()
            .map(|c| vec![
                c.name.clone(),
                c.email.clone(),
                c.company.clone().unwrap_or_default(),
                c.contact_type.clone(),
            ])
            .collect();
        print_table(&["name", "email", "company", "type"], rows);
        print_notices(&page.notices);
    }

    fn render_reports(&mut self) {
        let page = ReportsPage::new();
        self.rt.block_on(page.load(&self.api));
        println!("== Win/Loss Report ==");
        if let Some(r) = page.report.ready() {
            println!("wins: {}  losses: {}  win rate: {:.1}%", r.wins, r.losses, r.win_rate);
            let rows: Vec<Vec<String>> = r
                .monthly_data
                .iter()
                .map(|m| vec![m.month.clone(), m.wins.to_string(), m.losses.to_string()])
                .collect();
            print_table(&["month", "wins", "losses"], rows);
        }
        print_notices(&page.notices);
    }

    fn render_chat(&mut self) {
        println!("== Assistant ==");
        let transcript = self.chat.transcript();
        if transcript.is_empty() {
            println!("No messages yet. Use: chat <message>");
        }
        for turn in transcript {
            let who = match turn.speaker { Speaker::You => "you", Speaker::Assistant => "assistant" };
            println!("[{}] {}", who, turn.text);
        }
    }

    fn render_documents(&mut self) {
        let page = DocumentsPage::new();
        self.rt.block_on(async {
            page.load(&self.api).await;
            page.load_templates(&self.api).await;
        });
        println!("== Documents ==");
        let rows: Vec<Vec<String>> = page
            .documents
            .ready()
            .unwrap_or_default()
            .iter()
            .map(|d| vec![d.name.clone(), d.category.clone(), d.size.clone()])
            .collect();
        print_table(&["name", "category", "size"], rows);
        println!("-- templates --");
        let rows: Vec<Vec<String>> = page
            .templates
            .ready()
            .unwrap_or_default()
            .iter()
            .map(|t| vec![t.name.clone(), t.description.clone()])
            .collect();
        print_table(&["template", "description"], rows);
        print_notices(&page.notices);
    }

    fn render_notifications(&mut self) {
        let page = NotificationsPage::new();
        self.rt.block_on(page.load(&self.api));
        println!("== Notifications ({} unread) ==", page.unread_count());
        let rows: Vec<Vec<String>> = page
            .items
            .ready()
            .unwrap_or_default()
            .iter()
            .map(|n| vec![
                if n.read { " ".to_string() } else { "*".to_string() },
                n.title.clone(),
                n.message.clone(),
            ])
            .collect();
        print_table(&["", "title", "message"], rows);
        print_notices(&page.notices);
    }

    fn render_support(&mut self) {
        let page = SupportPage::new();
        self.rt.block_on(page.load(&self.api));
        println!("== Support Tickets ==");
        let rows: Vec<Vec<String>> = page
            .tickets
            .ready()
            .unwrap_or_default()
            .iter()
            .map(|t| vec![t.subject.clone(), t.status.clone(), t.priority.clone()])
            .collect();
        print_table(&["subject", "status", "priority"], rows);
        print_notices(&page.notices);
    }

    fn render_subscription(&mut self) {
        let page = SubscriptionPage::new();
        self.rt.block_on(page.load(&self.api));
        println!("== Subscription ==");
        if let Some(s) = page.subscription.ready() {
            println!("plan: {}  credits: {}  status: {}", s.plan, s.ai_credits, s.status);
        }
        print_notices(&page.notices);
    }

    fn render_analytics(&mut self) {
        let page = AnalyticsPage::new();
        self.rt.block_on(page.load(&self.api));
        println!("== Analytics ==");
        if let Some(t) = page.trends.ready() {
            let rows: Vec<Vec<String>> = t
                .categories
                .iter()
                .map(|c| vec![c.name.clone(), c.count.to_string(), bidmath::format_inr(c.value)])
                .collect();
            print_table(&["category", "tenders", "value"], rows);
        }
        print_notices(&page.notices);
    }

    fn render_admin(&mut self) {
        if !self.session.user().map(|u| u.role.is_admin()).unwrap_or(false) {
            eprintln!("admin console requires the super_admin role");
            return;
        }
        let page = AdminPage::new();
        self.rt.block_on(page.load(&self.api));
        println!("== Admin ==");
        if let Some(s) = page.stats.ready() {
            println!(
                "users: {}  tenders: {}  analyses: {}  revenue: {}",
                s.total_users, s.total_tenders, s.total_analyses,
                bidmath::format_inr(s.revenue_this_month)
            );
        }
        let rows: Vec<Vec<String>> = page
            .user_rows()
            .iter()
            .map(|u| vec![u.full_name.clone(), u.email.clone(), u.role.as_str().to_string()])
            .collect();
        print_table(&["name", "email", "role"], rows);
        print_notices(&page.notices);
    }
}

fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    match render_table(headers, &rows) {
        Some(t) => println!("{}", t),
        None => println!("(no items)"),
    }
}

fn print_notices(notices: &Notices) {
    for Notice { level, text } in notices.drain() {
        match level {
            NoticeLevel::Error => eprintln!("[error] {}", text),
            NoticeLevel::Success => println!("[ok] {}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_role_accepts_known_roles_only() {
        assert_eq!(parse_role("contractor"), Some(Role::Contractor));
        assert_eq!(parse_role("super_admin"), Some(Role::SuperAdmin));
        assert_eq!(parse_role("oem"), Some(Role::Oem));
        // typos must not register the user under a default role
        assert_eq!(parse_role("auditor"), None);
        assert_eq!(parse_role(""), None);
        assert_eq!(parse_role("Contractor"), None);
    }

    #[test]
    fn strip_command_matches_word_boundary() {
        assert_eq!(strip_command("open /tenders", "open"), Some("/tenders"));
        assert_eq!(strip_command("OPEN /tenders", "open"), Some("/tenders"));
        assert_eq!(strip_command("open", "open"), Some(""));
        assert_eq!(strip_command("opened", "open"), None);
    }
}

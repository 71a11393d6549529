// ============================
// cyberaware-backend-lib/src/pages.rs
// ============================
//! HTML rendering for every page of the site.
//!
//! Pages share one layout: a navigation bar whose links depend on whether a
//! user is logged in, the pending flash notices, the page body and a footer
//! with the server time.
use axum::http::StatusCode;
use cyberaware_common::Flash;

/// Per-request values every page needs
pub struct PageContext<'a> {
    /// Logged-in user, if any
    pub user: Option<&'a str>,
    /// Notices to show once
    pub flashes: &'a [Flash],
    /// Server time, already formatted
    pub current_time: &'a str,
}

/// Server time as shown in the page footer
pub fn current_time() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Escape text for inclusion in HTML
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub fn home(ctx: &PageContext<'_>) -> String {
    let greeting = match ctx.user {
        Some(user) => format!(
            r#"<p>Welcome back, <strong>{}</strong>. Head to your <a href="/dashboard">dashboard</a>.</p>"#,
            escape_html(user)
        ),
        None => r#"<p><a href="/login">Log in</a> or <a href="/register">create an account</a> to read the guides.</p>"#
            .to_string(),
    };

    let body = format!(
        r#"<h1>Cybersecurity Awareness</h1>
<p>Simple habits stop most attacks: strong unique passwords, software updates and a healthy suspicion of unexpected links.</p>
{greeting}"#
    );
    layout("Home", ctx, &body)
}

pub fn register(ctx: &PageContext<'_>, username: &str) -> String {
    let body = format!(
        r#"<h1>Register</h1>
<form method="POST" action="/register">
  <label>Username <input type="text" name="username" value="{username}" required autocomplete="username"></label>
  <label>Password <input type="password" name="password" required autocomplete="new-password"></label>
  <p class="hint">At least 12 characters with uppercase, lowercase, a number and one of ! @ # $ % ^ &amp; * ( ) - + =</p>
  <button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
        username = escape_html(username),
    );
    layout("Register", ctx, &body)
}

pub fn login(ctx: &PageContext<'_>, username: &str) -> String {
    let body = format!(
        r#"<h1>Login</h1>
<form method="POST" action="/login">
  <label>Username <input type="text" name="username" value="{username}" required autocomplete="username"></label>
  <label>Password <input type="password" name="password" required autocomplete="current-password"></label>
  <button type="submit">Login</button>
</form>
<p>No account? <a href="/register">Register</a></p>"#,
        username = escape_html(username),
    );
    layout("Login", ctx, &body)
}

pub fn dashboard(ctx: &PageContext<'_>, user: &str) -> String {
    let body = format!(
        r#"<h1>Dashboard</h1>
<p>Hello, <strong>{user}</strong>. Here is your security checklist:</p>
<ul>
  <li>Turn on multi-factor authentication for email and banking.</li>
  <li>Use a password manager and never reuse passwords.</li>
  <li>Keep your operating system and browser up to date.</li>
  <li>Back up important files to an offline location.</li>
</ul>"#,
        user = escape_html(user),
    );
    layout("Dashboard", ctx, &body)
}

pub fn about(ctx: &PageContext<'_>) -> String {
    let body = r#"<h1>About</h1>
<p>This site collects practical advice on staying safe online. It is written for people without a security background.</p>"#;
    layout("About", ctx, body)
}

pub fn contact(ctx: &PageContext<'_>) -> String {
    let body = r#"<h1>Contact</h1>
<p>To report a phishing attempt or ask a question, email <a href="mailto:security@example.org">security@example.org</a>.</p>"#;
    layout("Contact", ctx, body)
}

pub fn resources(ctx: &PageContext<'_>) -> String {
    let body = r#"<h1>Resources</h1>
<ul>
  <li><a href="https://www.cisa.gov/secure-our-world">CISA: Secure Our World</a></li>
  <li><a href="https://www.ncsc.gov.uk/collection/top-tips-for-staying-secure-online">NCSC: Top tips for staying secure online</a></li>
  <li><a href="https://haveibeenpwned.com/">Have I Been Pwned</a></li>
  <li><a href="https://owasp.org/www-project-top-ten/">OWASP Top Ten</a></li>
</ul>"#;
    layout("Resources", ctx, body)
}

pub fn not_found(ctx: &PageContext<'_>) -> String {
    layout(
        "Not Found",
        ctx,
        r#"<h1>Page not found</h1><p><a href="/">Back to the home page</a></p>"#,
    )
}

/// Standalone page for errors raised outside the normal handler flow
pub fn error_page(status: StatusCode, code: &str, message: &str) -> String {
    let ctx = PageContext {
        user: None,
        flashes: &[],
        current_time: &current_time(),
    };
    let body = format!(
        r#"<h1>{status}</h1>
<p>{message}</p>
<p class="hint">Error code {code}</p>"#,
        message = escape_html(message),
    );
    layout("Error", &ctx, &body)
}

fn layout(title: &str, ctx: &PageContext<'_>, body: &str) -> String {
    let nav = match ctx.user {
        Some(user) => format!(
            r#"<a href="/">Home</a> <a href="/dashboard">Dashboard</a> <a href="/about">About</a> <a href="/contact">Contact</a> <a href="/resources">Resources</a> <span class="user">{}</span> <a href="/logout">Logout</a>"#,
            escape_html(user)
        ),
        None => r#"<a href="/">Home</a> <a href="/register">Register</a> <a href="/login">Login</a>"#
            .to_string(),
    };

    let flashes: String = ctx
        .flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                flash.category.as_str(),
                escape_html(&flash.message)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title} | Cyber Awareness</title>
<style>{style}</style>
</head><body>
<nav>{nav}</nav>
<main>
{flashes}
{body}
</main>
<footer>Server time: {current_time}</footer>
</body></html>"#,
        style = STYLE,
        current_time = ctx.current_time,
    )
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f5f7fa;color:#1f2933}\
nav{background:#102a43;padding:12px 20px}nav a,nav .user{color:#f0f4f8;margin-right:14px;text-decoration:none}\
main{max-width:760px;margin:24px auto;padding:0 20px}footer{text-align:center;color:#829ab1;padding:20px}\
form label{display:block;margin:10px 0}.hint{color:#627d98;font-size:.9em}\
.flash{padding:10px 14px;border-radius:6px;margin:8px 0}.flash-success{background:#e3f9e5}\
.flash-danger{background:#ffe3e3}.flash-warning{background:#fffbea}.flash-info{background:#e6f6ff}";

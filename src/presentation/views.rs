//! Pure HTML rendering. Every function takes explicit view state and
//! returns a complete document; no IO, no globals. All user-supplied text
//! goes through `escape_html` before it reaches the markup.

use chrono::{DateTime, Utc};

use crate::domain::post::PostWithAuthor;
use crate::infrastructure::session::Identity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Banner {
    Success(String),
    Error(String),
}

#[derive(Debug)]
pub(crate) struct HomeView {
    pub(crate) user: Option<Identity>,
    pub(crate) banner: Option<Banner>,
    pub(crate) posts: Vec<PostWithAuthor>,
}

#[derive(Debug, Default)]
pub(crate) struct LoginView {
    pub(crate) error: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct RegisterView {
    pub(crate) banner: Option<Banner>,
    /// Preserved on validation failure so the user only retypes passwords.
    pub(crate) username: String,
}

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
.header { background: #333; color: white; padding: 20px; border-radius: 8px; margin-bottom: 20px; display: flex; justify-content: space-between; align-items: center; }
.header h1 { margin: 0; }
.btn { background: #007bff; color: white; padding: 10px 20px; border: none; border-radius: 4px; cursor: pointer; text-decoration: none; display: inline-block; }
.btn-secondary { background: #6c757d; }
.alert { padding: 10px; border-radius: 4px; margin-bottom: 20px; }
.alert-success { background: #d4edda; color: #155724; }
.alert-error { background: #f8d7da; color: #721c24; }
.card { background: white; border-radius: 8px; padding: 20px; margin-bottom: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.form-group { margin-bottom: 15px; }
.form-group label { display: block; margin-bottom: 5px; font-weight: bold; }
input, textarea { width: 100%; padding: 10px; border: 1px solid #ddd; border-radius: 4px; box-sizing: border-box; }
textarea { min-height: 100px; resize: vertical; }
.post-meta { color: #666; font-size: 14px; }
.post-content { line-height: 1.6; color: #555; }
.no-posts { text-align: center; padding: 40px; color: #666; }
"#;

pub(crate) fn render_home(view: &HomeView) -> String {
    let mut body = String::new();

    body.push_str("<div class=\"header\"><h1>Blog Posts</h1><div>");
    match &view.user {
        Some(identity) => {
            body.push_str(&format!(
                "<span>Welcome, {}!</span> <a href=\"/logout\" class=\"btn btn-secondary\">Logout</a>",
                escape_html(&identity.username)
            ));
        }
        None => {
            body.push_str(
                "<a href=\"/login\" class=\"btn\">Login</a> \
                 <a href=\"/register\" class=\"btn btn-secondary\">Register</a>",
            );
        }
    }
    body.push_str("</div></div>\n");

    push_banner(&mut body, view.banner.as_ref());

    if view.user.is_some() {
        body.push_str(
            "<div class=\"card\"><h2>Create New Post</h2>\
             <form method=\"POST\" action=\"/\">\
             <div class=\"form-group\"><label for=\"title\">Title:</label>\
             <input type=\"text\" id=\"title\" name=\"title\" maxlength=\"255\" required></div>\
             <div class=\"form-group\"><label for=\"content\">Content:</label>\
             <textarea id=\"content\" name=\"content\" required></textarea></div>\
             <button type=\"submit\" class=\"btn\">Create Post</button></form></div>\n",
        );
    }

    body.push_str(&format!("<h2>All Posts ({})</h2>\n", view.posts.len()));
    if view.posts.is_empty() {
        let hint = if view.user.is_some() {
            "Be the first to create one!"
        } else {
            "Please login to create the first post."
        };
        body.push_str(&format!(
            "<div class=\"no-posts\"><p>No posts yet. {hint}</p></div>\n"
        ));
    } else {
        for entry in &view.posts {
            body.push_str(&format!(
                "<div class=\"card\"><h3>{}</h3>\
                 <div class=\"post-meta\">by {} &bull; {}</div>\
                 <div class=\"post-content\">{}</div></div>\n",
                escape_html(&entry.post.title),
                escape_html(&entry.author_username),
                format_timestamp(entry.post.created_at),
                escape_html_multiline(&entry.post.content),
            ));
        }
    }

    page("Blog Posts", &body)
}

pub(crate) fn render_login(view: &LoginView) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"card\"><h2>Login</h2>\n");
    if let Some(error) = &view.error {
        push_banner(&mut body, Some(&Banner::Error(error.clone())));
    }
    body.push_str(
        "<form method=\"POST\" action=\"/login\">\
         <div class=\"form-group\">\
         <input type=\"text\" name=\"username\" placeholder=\"Username\" required></div>\
         <div class=\"form-group\">\
         <input type=\"password\" name=\"password\" placeholder=\"Password\" required></div>\
         <button type=\"submit\" class=\"btn\">Login</button></form>\
         <p>Don't have an account? <a href=\"/register\">Register here</a></p></div>\n",
    );
    page("Login", &body)
}

pub(crate) fn render_register(view: &RegisterView) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"card\"><h2>Register</h2>\n");
    push_banner(&mut body, view.banner.as_ref());
    body.push_str(&format!(
        "<form method=\"POST\" action=\"/register\">\
         <div class=\"form-group\">\
         <input type=\"text\" name=\"username\" placeholder=\"Username\" value=\"{}\" required></div>\
         <div class=\"form-group\">\
         <input type=\"password\" name=\"password\" placeholder=\"Password\" required></div>\
         <div class=\"form-group\">\
         <input type=\"password\" name=\"confirm_password\" placeholder=\"Confirm Password\" required></div>\
         <button type=\"submit\" class=\"btn\">Register</button></form>\
         <p>Already have an account? <a href=\"/login\">Login here</a></p></div>\n",
        escape_html(&view.username),
    ));
    page("Register", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

fn push_banner(out: &mut String, banner: Option<&Banner>) {
    let (class, message) = match banner {
        Some(Banner::Success(message)) => ("alert alert-success", message),
        Some(Banner::Error(message)) => ("alert alert-error", message),
        None => return,
    };
    out.push_str(&format!(
        "<div class=\"{class}\">{}</div>\n",
        escape_html(message)
    ));
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %-I:%M %p").to_string()
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes like `escape_html` and keeps line breaks visible as `<br>`.
fn escape_html_multiline(raw: &str) -> String {
    escape_html(raw).replace("\r\n", "\n").replace('\n', "<br>\n")
}

/// HTML rendering for the user listing page
///
/// Rendered with plain string building.
/// Every value that comes from the database goes through [`escape_html`].

use userboard_shared::models::user::User;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>User Management</title>
    <style>
        body { font-family: sans-serif; margin: 2rem; }
        table { border-collapse: collapse; margin-top: 1rem; }
        th, td { border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }
        form { margin-top: 2rem; }
        label { display: block; margin-top: 0.5rem; }
    </style>
</head>
<body>
    <h1>User Management</h1>
"#;

const ADD_USER_FORM: &str = r#"    <h2>Add User</h2>
    <form method="post" action="/add_user">
        <label>Name <input type="text" name="name" required></label>
        <label>Email <input type="email" name="email" required></label>
        <button type="submit">Add User</button>
    </form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Renders the listing page for `users`
pub fn render_users_page(users: &[User]) -> String {
    let mut html = String::with_capacity(PAGE_HEAD.len() + ADD_USER_FORM.len() + users.len() * 96);
    html.push_str(PAGE_HEAD);

    html.push_str("    <h2>Users</h2>\n");
    if users.is_empty() {
        html.push_str("    <p>No users yet.</p>\n");
    } else {
        html.push_str("    <table>\n");
        html.push_str("        <tr><th>ID</th><th>Name</th><th>Email</th></tr>\n");
        for user in users {
            html.push_str(&format!(
                "        <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                user.id,
                escape_html(&user.name),
                escape_html(&user.email)
            ));
        }
        html.push_str("    </table>\n");
    }

    html.push_str(ADD_USER_FORM);
    html.push_str(PAGE_TAIL);
    html
}

/// Escapes text for use in HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! Server-rendered HTML views.
//!
//! Presentation only: each page is a small string builder over data the
//! handlers computed. Everything interpolated into markup goes through
//! [`escape`].

use std::fmt::Write;

use staffbook_core::models::contact::Contact;

/// Department choices offered by the registration form. Stored verbatim;
/// the form constrains the choice client-side only.
const DEPARTMENT_OPTIONS: &[(&str, &[&str])] = &[
    (
        "개발본부",
        &["제1개발부", "제2개발부", "한국지사", "교육그룹", "AI솔루션그룹"],
    ),
    ("ICT본부", &["제1그룹", "제2그룹", "제3그룹", "제4그룹"]),
    (
        "사회인프라사업부",
        &["설계·품질그룹", "토호쿠사업소", "후쿠오카사업소", "스마트에너지솔루션부"],
    ),
    ("경영지원실", &["인사그룹", "경리그룹", "총무그룹"]),
    ("영업본부", &["영업본부"]),
    ("품질관리부", &["품질관리부"]),
];

const GENDER_OPTIONS: &[(&str, &str)] = &[("male", "Male"), ("female", "Female"), ("others", "Others")];

const POSITION_OPTIONS: &[(&str, &str)] = &[
    ("staff", "사원"),
    ("assistant_manager", "주임"),
    ("manager", "대리"),
    ("senior_manager", "과장"),
    ("deputy_general_manager", "차장"),
    ("general_manager", "부장"),
];

/// Escape a value for interpolation into HTML text or attributes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// The home view: sidebar contact list with search, plus sign-out.
pub fn home_page(contacts: &[Contact], q: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str("<div id=\"sidebar\">\n<h1>Staffbook Contacts</h1>\n");
    let _ = write!(
        body,
        "<form id=\"search-form\" role=\"search\">\
         <input id=\"q\" name=\"q\" type=\"search\" placeholder=\"Search\" \
         aria-label=\"Search contacts\" value=\"{}\"></form>\n",
        escape(q.unwrap_or(""))
    );
    body.push_str(
        "<form method=\"post\" action=\"/contacts\"><button type=\"submit\">New</button></form>\n",
    );

    if contacts.is_empty() {
        body.push_str("<p><i>No contacts</i></p>\n");
    } else {
        body.push_str("<nav><ul>\n");
        for contact in contacts {
            let first = contact.first.as_deref().unwrap_or("");
            let last = contact.last.as_deref().unwrap_or("");
            let name = if first.is_empty() && last.is_empty() {
                "<i>No Name</i>".to_string()
            } else {
                escape(format!("{first} {last}").trim())
            };
            let star = if contact.favorite { " ★" } else { "" };
            let _ = write!(body, "<li>{name}{star}</li>\n");
        }
        body.push_str("</ul></nav>\n");
    }

    body.push_str(
        "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Sign out</button></form>\n\
         </div>\n",
    );
    layout("Staffbook", &body)
}

/// The sign-in form, optionally with a failure message.
pub fn login_page(error: Option<&str>) -> String {
    layout("Sign in", &credentials_form("/login", "Sign in", error))
}

/// The sign-up form, optionally with a failure message.
pub fn register_page(error: Option<&str>) -> String {
    layout("Sign up", &credentials_form("/register", "Sign up", error))
}

fn credentials_form(action: &str, label: &str, error: Option<&str>) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>\n", escape(label));
    if let Some(message) = error {
        let _ = write!(body, "<p class=\"error\">{}</p>\n", escape(message));
    }
    let _ = write!(
        body,
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Email <input name=\"email\" type=\"email\" required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" required></label>\n\
         <button type=\"submit\">{}</button>\n</form>\n",
        escape(label)
    );
    body
}

/// The one-time employee registration form.
pub fn registration_page(login_id: i64) -> String {
    let mut body = String::new();
    body.push_str("<h1>개인정보 등록</h1>\n");
    let _ = write!(
        body,
        "<form method=\"post\" action=\"/user/new\" data-login-id=\"{login_id}\">\n"
    );
    body.push_str(
        "<p><span>Name</span>\
         <input name=\"first\" placeholder=\"First\" type=\"text\" required>\
         <input name=\"last\" placeholder=\"Last\" type=\"text\" required></p>\n\
         <p><span>Name Kana</span>\
         <input name=\"first_kana\" placeholder=\"First Kana\" type=\"text\" required>\
         <input name=\"last_kana\" placeholder=\"Last Kana\" type=\"text\" required></p>\n\
         <label>Birth <input name=\"birth\" type=\"date\" required></label>\n",
    );

    body.push_str("<fieldset><legend>Gender</legend>\n");
    for (value, label) in GENDER_OPTIONS {
        let _ = write!(
            body,
            "<label><input type=\"radio\" name=\"gender\" value=\"{value}\" required> {label}</label>\n"
        );
    }
    body.push_str("</fieldset>\n");

    body.push_str(
        "<label>Phone number \
         <input name=\"phonenumber\" placeholder=\"08012345678\" type=\"tel\" required></label>\n\
         <label>Address <input name=\"address\" type=\"text\" placeholder=\"Your address\"></label>\n",
    );

    body.push_str("<fieldset><legend>Position</legend>\n");
    for (value, label) in POSITION_OPTIONS {
        let _ = write!(
            body,
            "<label><input type=\"radio\" name=\"position\" value=\"{value}\" required> {label}</label>\n"
        );
    }
    body.push_str("</fieldset>\n");

    body.push_str("<label>Main department <select name=\"upper_department\" required>\n<option value=\"\">Choose</option>\n");
    for (upper, _) in DEPARTMENT_OPTIONS {
        let _ = write!(body, "<option value=\"{0}\">{0}</option>\n", escape(upper));
    }
    body.push_str("</select></label>\n");

    body.push_str("<label>Sub department <select name=\"lower_department\" required>\n<option value=\"\">Choose</option>\n");
    for (_, lowers) in DEPARTMENT_OPTIONS {
        for lower in *lowers {
            let _ = write!(body, "<option value=\"{0}\">{0}</option>\n", escape(lower));
        }
    }
    body.push_str("</select></label>\n");

    body.push_str(
        "<label>Career start date <input name=\"career_start_date\" type=\"date\" required></label>\n\
         <label>Notes <textarea name=\"notes\" rows=\"6\"></textarea></label>\n\
         <p><button type=\"submit\">등록</button></p>\n</form>\n",
    );
    layout("개인정보 등록", &body)
}

/// A plain error page with a user-facing message.
pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        &format!("<h1>Something went wrong</h1>\n<p>{}</p>\n", escape(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>\"&'</script>"),
            "&lt;script&gt;&quot;&amp;&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn home_page_escapes_query() {
        let page = home_page(&[], Some("<img>"));
        assert!(page.contains("&lt;img&gt;"));
        assert!(!page.contains("<img>"));
    }

    #[test]
    fn registration_page_lists_all_positions() {
        let page = registration_page(1);
        for (value, _) in POSITION_OPTIONS {
            assert!(page.contains(&format!("value=\"{value}\"")));
        }
    }
}

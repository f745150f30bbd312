use std::fmt;

use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const LAST_LOGIN_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// One row of the `users` table, in column order
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRow {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub ssn: Option<String>,
    pub password: Option<String>,
    pub ip: Option<String>,
    pub last_login: Option<PrimitiveDateTime>,
    pub user_agent: Option<String>,
}

/// Renders as `name=..; email=..; ...; user_agent=..;` with NULL as empty
impl fmt::Display for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last_login = match &self.last_login {
            Some(ts) => ts.format(LAST_LOGIN_FORMAT).map_err(|_| fmt::Error)?,
            None => String::new(),
        };
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        write!(
            f,
            "name={}; email={}; phone={}; ssn={}; password={}; ip={}; last_login={}; user_agent={};",
            text(&self.name),
            text(&self.email),
            text(&self.phone),
            text(&self.ssn),
            text(&self.password),
            text(&self.ip),
            last_login,
            text(&self.user_agent),
        )
    }
}

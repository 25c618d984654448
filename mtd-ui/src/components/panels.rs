use gpui::{App, ClickEvent, Div, FontWeight, ParentElement, Styled, Window, div};
use gpui_component::{
    button::{Button, ButtonVariants},
    h_flex, v_flex,
};
use mtd_core::User;

use crate::components::make_button;

pub const REGISTER_URL: &str = "https://www.gov.uk/log-in-register-hmrc-online-services";
pub const SELF_ASSESSMENT_DEADLINE: &str = "Self Assessment Deadline: 31 January 2026";
pub const VAT_DEADLINE: &str = "VAT Deadline: 7th of next month (quarterly)";

pub const LOGIN_TITLE: &str = "Login with Government Gateway";
pub const LOGIN_EXPLANATION: &str = "Sign in to submit financial reports to HMRC.";
pub const CREDENTIALS_HINT: &str = "Requires HMRC Government Gateway credentials.";

fn panel() -> Div {
    v_flex().gap_2().p_4().rounded_md().border_1()
}

pub fn login_panel(
    on_login: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
) -> Div {
    panel()
        .child(
            div()
                .text_xl()
                .font_weight(FontWeight::BOLD)
                .child(LOGIN_TITLE),
        )
        .child(LOGIN_EXPLANATION)
        .child(make_button("login", LOGIN_TITLE, on_login))
        .child(
            h_flex()
                .gap_1()
                .text_sm()
                .child(CREDENTIALS_HINT)
                .child(
                    Button::new("register")
                        .link()
                        .label("Register here")
                        .on_click(|_, _, cx| cx.open_url(REGISTER_URL)),
                ),
        )
}

pub fn dashboard_header(
    user: &User,
    notice: Option<&str>,
) -> Div {
    panel()
        .children(notice.map(|text| div().text_sm().child(text.to_string())))
        .child(
            div()
                .text_xl()
                .font_weight(FontWeight::BOLD)
                .child(welcome_line(user)),
        )
        .child(utr_line(user))
        .child(SELF_ASSESSMENT_DEADLINE)
        .child(VAT_DEADLINE)
}

fn welcome_line(user: &User) -> String {
    format!("Dashboard - Welcome, {}", user.name)
}

fn utr_line(user: &User) -> String {
    format!("Unique Taxpayer Reference (UTR): {}", user.utr)
}

#[cfg(test)]
mod tests {
    use mtd_core::{IdentityProvider, SimulatedGateway};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dashboard_lines_name_the_gateway_user() {
        let user = SimulatedGateway.login();

        assert_eq!(welcome_line(&user), "Dashboard - Welcome, Business User");
        assert_eq!(utr_line(&user), "Unique Taxpayer Reference (UTR): 1234567890");
    }
}

use gpui::{
    App, AppContext, Context, Entity, FontWeight, InteractiveElement, IntoElement, ParentElement,
    Render, StatefulInteractiveElement, Styled, Subscription, Window, div,
};
use gpui_component::{Disableable, h_flex, v_flex};
use mtd_core::{FormData, SimulatedGateway};
use tracing::{info, warn};

use crate::components::{
    SubmissionForm, make_button,
    chart::submission_chart,
    panels::{dashboard_header, login_panel},
};
#[cfg(not(target_os = "linux"))]
use crate::{Quit, quit};
use crate::{
    gui::WINDOW_TITLE,
    logging::log_task_error,
    state::{AppState, ViewSnapshot},
};

/// The single application window: login or dashboard, the form, the submit
/// button, the status line and the chart.
pub struct AppWindow {
    _window_close_subscription: Subscription,
    state: AppState,
    form: Entity<SubmissionForm>,
    snapshot: ViewSnapshot,
    notice: Option<String>,
}

impl AppWindow {
    pub fn new(
        state: AppState,
        prefill: &FormData,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let subscription = cx.on_window_closed(|_cx: &mut App| {
            info!("Window closed");
            #[cfg(not(target_os = "linux"))]
            quit(&Quit, _cx);
        });

        let form = cx.new(|form_cx| SubmissionForm::new(prefill, window, form_cx));
        let snapshot = state.snapshot().unwrap_or_default();

        Self {
            _window_close_subscription: subscription,
            state,
            form,
            snapshot,
            notice: None,
        }
    }

    /// Re-reads controller state. Keeps the previous snapshot if the
    /// submission task holds the lock right now.
    fn refresh(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        if let Some(snapshot) = self.state.snapshot() {
            self.snapshot = snapshot;
        }
        cx.notify();
    }

    fn login(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        match self.state.login(&SimulatedGateway) {
            Ok(_) => self.notice = Some(SimulatedGateway::LOGIN_MESSAGE.to_string()),
            Err(e) => warn!(error = %e, "login ignored"),
        }
        self.refresh(cx);
    }

    fn submit(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        let form = self.form.read(cx).to_form_data(cx);
        let handle = match self.state.start_submission(form) {
            Ok(handle) => handle,
            Err(_) => {
                // The controller has already set the status line.
                self.refresh(cx);
                return;
            }
        };
        self.refresh(cx);

        cx.spawn(async move |this, cx| {
            let outcome = handle.await;
            log_task_error("submission", outcome.map(|_| ()));
            let _ = this.update(cx, |view, cx| view.refresh(cx));
        })
        .detach();
    }
}

impl Render for AppWindow {
    fn render(
        &mut self,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let header = match &self.snapshot.user {
            Some(user) => dashboard_header(user, self.notice.as_deref()),
            None => login_panel(cx.listener(|this, _, _, cx| this.login(cx))),
        };

        let submitting = self.snapshot.is_submitting();
        let submit = make_button(
            "submit",
            "Submit to HMRC",
            cx.listener(|this, _, _, cx| this.submit(cx)),
        )
        .loading(submitting)
        .disabled(submitting);

        v_flex()
            .id("mtd-main")
            .size_full()
            .overflow_y_scroll()
            .p_5()
            .gap_4()
            .child(div().text_2xl().font_weight(FontWeight::BOLD).child(WINDOW_TITLE))
            .child(header)
            .child(self.form.clone())
            .child(
                h_flex()
                    .gap_4()
                    .items_center()
                    .child(submit)
                    .children(self.snapshot.status.clone().map(|status| div().child(status))),
            )
            .child(submission_chart(&self.snapshot.counts))
    }
}

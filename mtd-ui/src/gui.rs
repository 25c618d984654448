use anyhow::Result;
use gpui::{
    App, AppContext, Bounds, KeyBinding, Menu, MenuItem, TitlebarOptions, WindowBounds,
    WindowOptions,
};
use gpui_component::Root;
use mtd_core::FormData;
use tracing::info;

use crate::{
    Quit,
    components::{AppWindow, WindowPreferences},
    quit,
    state::AppState,
};

pub const WINDOW_TITLE: &str = "HMRC Financial Report Submission";

pub fn setup_app(app_cx: &mut App) {
    // This must be called before using any GPUI Component features.
    gpui_component::init(app_cx);

    app_cx.activate(true);

    #[cfg(target_os = "macos")]
    app_cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

    #[cfg(not(target_os = "macos"))]
    app_cx.bind_keys([
        KeyBinding::new("ctrl-q", Quit, None),
        KeyBinding::new("alt-F4", Quit, None),
    ]);

    app_cx.on_action(quit);

    app_cx.set_menus(vec![Menu {
        name: WINDOW_TITLE.into(),
        items: vec![MenuItem::action("Quit", Quit)],
    }]);
}

/// Opens the main window over `state`, with the form prefilled from `prefill`.
pub fn open_main_window(
    app_cx: &mut App,
    state: AppState,
    prefill: FormData,
    preferences: WindowPreferences,
) -> Result<()> {
    let options = WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
            None,
            preferences.size,
            app_cx,
        ))),
        titlebar: Some(TitlebarOptions {
            title: Some(WINDOW_TITLE.into()),
            ..Default::default()
        }),
        ..Default::default()
    };

    app_cx.open_window(options, |window, cx| {
        let view = cx.new(|view_cx| AppWindow::new(state, &prefill, window, view_cx));
        cx.new(|root_cx| Root::new(view, window, root_cx))
    })?;

    info!("Main window opened");
    Ok(())
}

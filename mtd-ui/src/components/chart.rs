use gpui::{Div, FontWeight, ParentElement, Styled, TextAlign, div, px, rgb};
use gpui_component::{h_flex, v_flex};
use mtd_core::calculations::ChartCounts;
use mtd_core::calculations::chart::{CHART_TITLE, DATASET_LABEL, X_AXIS_TITLE, Y_AXIS_TITLE};

const PLOT_HEIGHT: f32 = 160.;
const BAR_WIDTH: f32 = 64.;

/// Height of a bar, scaled so the tallest bar fills the plot.
fn bar_height(
    count: usize,
    max: usize,
) -> f32 {
    if max == 0 {
        0.
    } else {
        PLOT_HEIGHT * count as f32 / max as f32
    }
}

/// Bar chart of submissions per report category.
pub fn submission_chart(counts: &ChartCounts) -> Div {
    let max = counts.max();

    let bars = counts.bars().fold(
        h_flex().gap_4().items_end().h(px(PLOT_HEIGHT + 24.)),
        |row, bar| {
            row.child(
                v_flex()
                    .items_center()
                    .gap_1()
                    .child(div().text_sm().child(bar.count.to_string()))
                    .child(
                        div()
                            .w(px(BAR_WIDTH))
                            .h(px(bar_height(bar.count, max)))
                            .bg(rgb(bar.color))
                            .border_1()
                            .border_color(rgb(bar.border_color)),
                    ),
            )
        },
    );

    let labels = counts.bars().fold(h_flex().gap_4(), |row, bar| {
        row.child(
            div()
                .w(px(BAR_WIDTH))
                .text_xs()
                .text_align(TextAlign::Center)
                .child(bar.label),
        )
    });

    v_flex()
        .gap_2()
        .p_3()
        .rounded_md()
        .border_1()
        .child(
            h_flex()
                .justify_between()
                .child(div().font_weight(FontWeight::BOLD).child(CHART_TITLE))
                .child(div().text_xs().child(DATASET_LABEL)),
        )
        .child(
            h_flex()
                .gap_2()
                .items_center()
                .child(div().text_xs().child(Y_AXIS_TITLE))
                .child(v_flex().child(bars).child(labels)),
        )
        .child(div().text_xs().child(X_AXIS_TITLE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_draws_flat_bars() {
        assert_eq!(bar_height(0, 0), 0.);
    }

    #[test]
    fn tallest_bar_fills_the_plot() {
        assert_eq!(bar_height(4, 4), PLOT_HEIGHT);
        assert_eq!(bar_height(2, 4), PLOT_HEIGHT / 2.);
    }
}

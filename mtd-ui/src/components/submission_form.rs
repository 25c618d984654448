use std::collections::BTreeMap;

use gpui::{
    App, AppContext, Context, Div, Entity, IntoElement, ParentElement, Render, SharedString,
    Styled, TextAlign, Window, div, px,
};
use gpui_component::{
    h_flex,
    input::{Input, InputState},
    v_flex,
};
use mtd_core::{FormData, FormField, FormSection};

/// The fourteen text inputs, grouped into their four sections.
///
/// Inputs are free text; numeric checks happen on submit so the user sees
/// the same messages whether a value was typed or prefilled.
pub struct SubmissionForm {
    inputs: BTreeMap<FormField, Entity<InputState>>,
}

impl SubmissionForm {
    pub fn new(
        prefill: &FormData,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let inputs = FormField::ALL
            .into_iter()
            .map(|field| {
                let value = prefill.get(field).to_string();
                let state = cx.new(|input_cx| {
                    InputState::new(window, input_cx)
                        .placeholder(field.placeholder())
                        .default_value(value)
                });
                (field, state)
            })
            .collect();

        Self { inputs }
    }

    /// Collects the current text of every input.
    pub fn to_form_data(
        &self,
        cx: &App,
    ) -> FormData {
        self.inputs
            .iter()
            .map(|(field, state)| (*field, state.read(cx).value().to_string()))
            .collect()
    }

    fn section(
        &self,
        section: FormSection,
    ) -> Div {
        section.fields().fold(
            v_flex()
                .gap_2()
                .p_3()
                .rounded_md()
                .border_1()
                .child(div().text_lg().child(section.title())),
            |column, field| match self.inputs.get(&field) {
                Some(state) => column.child(make_input_row(state, field.label())),
                None => column,
            },
        )
    }
}

impl Render for SubmissionForm {
    fn render(
        &mut self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let [pl, bs, vat, sa] = FormSection::ALL;

        v_flex()
            .gap_3()
            .w_full()
            .child(
                h_flex()
                    .gap_3()
                    .items_start()
                    .child(self.section(pl).flex_1())
                    .child(self.section(bs).flex_1()),
            )
            .child(
                h_flex()
                    .gap_3()
                    .items_start()
                    .child(self.section(vat).flex_1())
                    .child(self.section(sa).flex_1()),
            )
    }
}

fn make_input_row(
    state: &Entity<InputState>,
    input_label: impl Into<SharedString>,
) -> Div {
    h_flex()
        .items_center()
        .gap_3()
        .child(
            div()
                .min_w(px(190.))
                .text_align(TextAlign::Right)
                .child(input_label.into()),
        )
        .child(Input::new(state).flex_grow())
}

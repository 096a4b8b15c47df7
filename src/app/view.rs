// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The screen is a header card above the detector card, with toasts stacked
//! on top. Everything here is a pure function of [`ViewContext`].

use super::Message;
use crate::detector::Detector;
use crate::i18n::fluent::I18n;
use crate::ui::components::{progress_indicator, result_display, upload_box};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::{self, Toast};
use crate::ui::styles;
use iced::widget::{button, scrollable, Column, Container, Stack, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub detector: &'a Detector,
    pub upload: &'a upload_box::State,
    pub notifications: &'a notifications::Manager,
    pub spinner_rotation: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .push(view_header(ctx.i18n))
        .push(view_detector(&ctx));

    let page = Container::new(scrollable(
        Container::new(content)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    ))
    .width(Length::Fill)
    .height(Length::Fill);

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new()
        .push(page)
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_header<'a>(i18n: &I18n) -> Element<'a, Message> {
    let header = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .push(Text::new(i18n.tr("header-title")).size(typography::TITLE_LG))
        .push(Text::new(i18n.tr("header-subtitle")).size(typography::BODY_LG));

    Container::new(header)
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(styles::container::card)
        .into()
}

fn view_detector<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let detector = ctx.detector;
    let is_loading = detector.is_loading();

    let mut body = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .push(
            ctx.upload
                .view(
                    ctx.i18n,
                    detector.selected().map(|image| image.file_name()),
                    is_loading,
                )
                .map(Message::Upload),
        );

    if detector.can_analyze() {
        body = body.push(
            button(
                Container::new(Text::new(ctx.i18n.tr("analyze-button")).size(typography::BODY_LG))
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
            )
            .width(Length::Fill)
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .padding(spacing::XS)
            .on_press(Message::AnalyzePressed)
            .style(styles::button::primary),
        );
    }

    if is_loading {
        body = body.push(progress_indicator::view(ctx.spinner_rotation, ctx.i18n));
    }

    let panel = result_display::panel(detector.result(), detector.preview(), detector.error());
    body = body.push(result_display::view(panel, ctx.i18n));

    Container::new(body)
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(styles::container::card)
        .into()
}

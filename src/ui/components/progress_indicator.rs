// SPDX-License-Identifier: MPL-2.0
//! Spinner and label shown while a classification request is outstanding.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{Row, Text};
use iced::{alignment, Element};

pub fn view<'a, Message: 'static>(rotation: f32, i18n: &I18n) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(AnimatedSpinner::new(palette::PRIMARY_500, rotation).into_element())
        .push(Text::new(i18n.tr("progress-label")).size(typography::BODY_LG))
        .into()
}

//! Relaxation menu: five fixed techniques, each bound to a callback token.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelaxOption {
    Breathing,
    Music,
    MiniExercise,
    Grounding,
    BodyScan,
}

impl fmt::Display for RelaxOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl RelaxOption {
    /// Menu order, top to bottom.
    pub const ALL: [RelaxOption; 5] = [
        RelaxOption::Breathing,
        RelaxOption::Music,
        RelaxOption::MiniExercise,
        RelaxOption::Grounding,
        RelaxOption::BodyScan,
    ];

    /// Callback payload attached to the menu button.
    pub fn token(&self) -> &'static str {
        match self {
            RelaxOption::Breathing => "relax_breath",
            RelaxOption::Music => "relax_music",
            RelaxOption::MiniExercise => "relax_ex",
            RelaxOption::Grounding => "relax_grounding",
            RelaxOption::BodyScan => "relax_body_scan",
        }
    }

    /// Button caption.
    pub fn title(&self) -> &'static str {
        match self {
            RelaxOption::Breathing => "Дихальні вправи",
            RelaxOption::Music => "Релакс-музика",
            RelaxOption::MiniExercise => "Міні-вправа (2 хв)",
            RelaxOption::Grounding => "Заземлення 5-4-3-2-1",
            RelaxOption::BodyScan => "Сканування тіла",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.token() == token)
    }

    /// Instruction text sent when the option is chosen.
    pub fn instructions(&self) -> &'static str {
        match self {
            RelaxOption::Breathing => {
                "Вправа 4-4-4: вдих 4с, затримка 4с, видих 4с × 5 разів."
            }
            RelaxOption::Music => "Релакс-музика: https://youtu.be/2OEL4P1Rz04",
            RelaxOption::MiniExercise => {
                "Міні-вправа: закрийте очі та 2 хвилини дихайте повільно."
            }
            RelaxOption::Grounding => {
                "Заземлення 5-4-3-2-1:\n\
                 • Назвіть 5 предметів, які бачите.\n\
                 • Почуйте 4 звуки.\n\
                 • Торкніться 3 речей.\n\
                 • Замисліться про 2 запахи.\n\
                 • Згадайте 1 приємний спогад."
            }
            RelaxOption::BodyScan => {
                "Сканування тіла: повільно пройдіться увагою від голови до ніг, \
                 відчуваючи і розслабляючи кожну ділянку."
            }
        }
    }
}

/// Inline keyboards the bot can attach to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Relax,
}

/// One button of a rendered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuButton {
    pub title: &'static str,
    pub token: &'static str,
}

impl Menu {
    pub fn buttons(&self) -> Vec<MenuButton> {
        match self {
            Menu::Relax => RelaxOption::ALL
                .iter()
                .map(|option| MenuButton {
                    title: option.title(),
                    token: option.token(),
                })
                .collect(),
        }
    }
}

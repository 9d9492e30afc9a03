//! Static reply texts.

pub const RELAX_MUSIC_URL: &str = "https://youtu.be/2OEL4P1Rz04";

pub const START_TEXT: &str = "Привіт! Я CareBot — AI-помічник для психологічної підтримки.\n\n\
    Команди:\n\
    /mood — поділитися почуттями\n\
    /diary — переглянути емоційний щоденник\n\
    /relax — техніки релаксації\n\
    /contact — контакти спеціалістів\n\
    /help — допомога";

pub const HELP_TEXT: &str = "Я аналізую ваш текст і допомагаю заспокоїтись. Використайте /mood.";

pub const MOOD_PROMPT: &str = "Розкажіть, будь ласка, як ви почуваєтесь зараз.";

pub const RELAX_PROMPT: &str = "Оберіть техніку релаксації:";

pub const NEUTRAL_MENU_PROMPT: &str = "Оберіть один із способів розслабитися:";

pub const NEGATIVE_MENU_PROMPT: &str = "Оберіть техніку, щоб отримати інструкцію:";

pub const CONTACTS_TEXT: &str = "Контакти:\n\
    • Психолог — +380 99 000 00 00\n\
    • Лінія допомоги — 7333\n\n\
    Якщо є ризик — негайно телефонуйте!";

pub const DIARY_EMPTY_TEXT: &str = "Поки немає записів. Використайте /mood.";

pub const DIARY_FAILURE_TEXT: &str = "Не вдалося отримати записи. Спробуйте пізніше.";

pub const PROCESSING_FAILURE_TEXT: &str =
    "Вибачте, не вдалося зберегти ваш запис. Спробуйте ще раз через /mood.";

pub fn positive_reply(score: f32) -> String {
    format!(
        "😊 Я дуже радий чути, що у вас чудовий настрій! (score={score:.2})\n\n\
         Щоб підтримати спокій — ось легка релакс-музика:\n\
         {RELAX_MUSIC_URL}\n\n\
         Продовжуйте в тому ж дусі!"
    )
}

pub fn neutral_reply(score: f32) -> String {
    format!("🙂 Дякую, що поділилися. (score={score:.2})\n\n{NEUTRAL_MENU_PROMPT}")
}

/// Empathetic opener of the negative flow, listing seven coping techniques.
pub fn negative_support(score: f32) -> String {
    format!(
        "😔 Мені дуже шкода, що вам зараз важко. (score={score:.2})\n\n\
         Ось кілька технік, які можуть допомогти вам стабілізувати емоції:\n\
         1️⃣ Дихальна техніка 4-7-8\n\
         2️⃣ Заземлення 5-4-3-2-1\n\
         3️⃣ Релакс-музика: {RELAX_MUSIC_URL}\n\
         4️⃣ Міні-вправа: повільне розтягнення плечей і шиї\n\
         5️⃣ Стисніть і відпустіть кулаки 10 разів\n\
         6️⃣ Сканування тіла\n\
         7️⃣ Повільне пиття води\n\n\
         Ви не самі. Я поряд."
    )
}

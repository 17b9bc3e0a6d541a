use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::errors::{BotError, BotResult};

/// Prompt shown on `/start`, before any language is known
pub const LANGUAGE_PROMPT: &str = "🔊 Tilni tanlang / Choose language / Выберите язык:";

#[derive(EnumIter, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    Uz,
    Ru,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Uz => "uz",
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// Label for the language picker
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Uz => "O'zbekcha",
            Language::Ru => "Русский",
            Language::En => "English",
        }
    }

    pub fn all() -> impl Iterator<Item = Language> {
        Language::iter()
    }
}

#[derive(Debug)]
pub struct LocalizedMessages {
    pub start_text: &'static str,
    pub choose_language_text: &'static str,
    pub choose_type_text: &'static str,
    pub ask_link_text: &'static str,
    /// Audio label, then video label
    pub button_labels: (&'static str, &'static str),
    pub downloading_text: &'static str,
    pub attribution_suffix: &'static str,
    pub error_prefix: &'static str,
    pub busy_text: &'static str,
    pub link_expired_text: &'static str,
}

static UZ: LocalizedMessages = LocalizedMessages {
    start_text: "👋 Salom!\n\nBu — *Saver on YouTube* 📅\nSiz YouTube’dan video yoki audio fayllarni yuklab olish uchun yaratilgan oddiy, lekin qulay botdasiz.\n\n🎬 Foydalanish: YouTube havolasini yuboring — men yuklab beraman.\n\n❌ Faqat YouTube havolalari yuboring.\n\n❓ Muammo bo‘lsa, @Abdullayev774 ga yozing",
    choose_language_text: "🔊 Tilni tanlang:",
    choose_type_text: "🔊 Fayl turini tanlang:",
    ask_link_text: "🔗 Iltimos, YouTube havolasini yuboring.",
    button_labels: ("🎧 Audio", "🎬 Video"),
    downloading_text: "🔄 Yuklanmoqda...",
    attribution_suffix: "\n\n🔗 @SaveronYoutuber_bot orqali yuklab olindi",
    error_prefix: "❌ Xatolik:",
    busy_text: "⏳ Hozir juda ko‘p yuklanmalar bor. Birozdan so‘ng qayta urinib ko‘ring.",
    link_expired_text: "⌛ Havola eskirgan. Iltimos, uni qayta yuboring.",
};

static RU: LocalizedMessages = LocalizedMessages {
    start_text: "👋 Привет!\n\nЭто — *Saver on YouTube* 📅\nЭто простой и удобный бот для скачивания YouTube видео или аудио.\n\n🎬 Просто отправьте ссылку.\n\n❌ Только YouTube ссылки.\n\n❓ Если есть вопросы: @Abdullayev774",
    choose_language_text: "🔊 Выберите язык:",
    choose_type_text: "🔊 Выберите тип файла:",
    ask_link_text: "🔗 Отправьте ссылку на YouTube.",
    button_labels: ("🎧 Аудио", "🎬 Видео"),
    downloading_text: "🔄 Скачивание...",
    attribution_suffix: "\n\n🔗 Скачано через @SaveronYoutuber_bot",
    error_prefix: "❌ Ошибка:",
    busy_text: "⏳ Сейчас слишком много загрузок. Попробуйте чуть позже.",
    link_expired_text: "⌛ Ссылка устарела. Отправьте её ещё раз.",
};

static EN: LocalizedMessages = LocalizedMessages {
    start_text: "👋 Hello!\n\nWelcome to *Saver on YouTube* 📅\nYou can download videos or audio from YouTube here easily.\n\n🎬 Just send the YouTube link.\n\n❌ Only YouTube links are supported.\n\n❓ Questions? Message @Abdullayev774",
    choose_language_text: "🔊 Please choose your language:",
    choose_type_text: "🔊 Select the file type:",
    ask_link_text: "🔗 Send the YouTube link:",
    button_labels: ("🎧 Audio", "🎬 Video"),
    downloading_text: "🔄 Downloading...",
    attribution_suffix: "\n\n🔗 Downloaded via @SaveronYoutuber_bot",
    error_prefix: "❌ Error:",
    busy_text: "⏳ Too many downloads right now. Please try again in a moment.",
    link_expired_text: "⌛ This link has expired. Please send it again.",
};

pub fn get_messages(language: Language) -> &'static LocalizedMessages {
    match language {
        Language::Uz => &UZ,
        Language::Ru => &RU,
        Language::En => &EN,
    }
}

impl LocalizedMessages {
    /// Look up messages by raw language code
    pub fn for_code(code: &str) -> BotResult<&'static LocalizedMessages> {
        Language::from_str(code)
            .map(get_messages)
            .map_err(|_| BotError::UnsupportedLanguage(code.to_string()))
    }
}

//! System prompts and static fallback texts used by the responder.
//!
//! Replies are produced in Russian, matching the knowledge base.

/// Contact email shown in the escalation message.
pub const SUPPORT_EMAIL: &str = "it-support@company.com";

/// Contact phone shown in the escalation message.
pub const SUPPORT_PHONE: &str = "+7 (495) 123-45-67";

/// Business hours shown in the escalation message.
pub const SUPPORT_HOURS: &str = "Пн-Пт 9:00-18:00";

/// Prefix of the verbatim knowledge-base fallback.
pub const KNOWLEDGE_FALLBACK_PREFIX: &str = "Вот информация по вашему вопросу:";

/// System prompt asking the model to adapt a canned answer to the question.
pub fn personalize_prompt(base_answer: &str) -> String {
    format!(
        "Ты - помощник ИТ-поддержки. У тебя есть стандартный ответ на вопрос пользователя, \
         но ты должен адаптировать его под конкретный вопрос, сделать более персональным и дружелюбным.\n\n\
         Стандартный ответ:\n{base_answer}\n\n\
         Ответь на русском языке, будь вежливым и профессиональным."
    )
}

/// System prompt for questions without a knowledge-base entry.
pub const GENERAL_PROMPT: &str = "\
Ты - опытный специалист ИТ-поддержки в российской компании.
Твоя задача - помочь пользователям решить их технические проблемы.

Отвечай:
- На русском языке
- Кратко и по существу
- С пошаговыми инструкциями когда это необходимо
- Профессионально и дружелюбно

Если не можешь решить проблему, предложи обратиться к специалисту ИТ-поддержки.";

/// Verbatim knowledge-base answer, clearly labeled.
pub fn knowledge_fallback(base_answer: &str) -> String {
    format!("{KNOWLEDGE_FALLBACK_PREFIX}\n\n{base_answer}")
}

/// Last-resort reply pointing the user to human support.
pub fn escalation_message() -> String {
    format!(
        "Извините, в данный момент я не могу обработать ваш запрос.\n\
         Пожалуйста, обратитесь к специалисту ИТ-поддержки:\n\n\
         📧 Email: {SUPPORT_EMAIL}\n\
         📞 Телефон: {SUPPORT_PHONE}\n\
         🕐 Рабочие часы: {SUPPORT_HOURS}\n\n\
         Или оставьте заявку в ServiceDesk системе."
    )
}

/// Apology returned when a chat turn fails outright.
pub const APOLOGY_MESSAGE: &str = "Извините, произошла ошибка. Пожалуйста, попробуйте позже \
или обратитесь к специалисту ИТ-поддержки.";

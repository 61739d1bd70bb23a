//! Static knowledge base of canned support instructions.
//!
//! One entry per non-general category. `General` intentionally has no entry:
//! a `None` lookup tells the responder to produce a free-form answer.

use helpdesk_types::exchange::Category;

const PASSWORD: &str = "\
Для сброса пароля:
1. Перейдите на страницу https://password-reset.company.com
2. Введите ваш рабочий email
3. Проверьте почту и следуйте инструкциям
4. Если письмо не пришло, проверьте папку \"Спам\"
5. При проблемах обратитесь к системному администратору

Требования к паролю:
- Минимум 8 символов
- Должен содержать заглавные и строчные буквы
- Должен содержать цифры
- Должен содержать специальные символы";

const ACCESS: &str = "\
Для получения доступа к папке:
1. Определите полный путь к нужной папке
2. Обратитесь к вашему руководителю для подтверждения необходимости доступа
3. Отправьте заявку через ServiceDesk с указанием:
   - Полного пути к папке
   - Типа доступа (чтение/запись)
   - Бизнес-обоснования
4. Ожидайте обработки заявки (обычно 1-2 рабочих дня)";

const DOCUMENTS: &str = "\
Для отправки документов:
1. Используйте корпоративную систему документооборота
2. Убедитесь, что документ в поддерживаемом формате (PDF, DOC, DOCX)
3. Проверьте размер файла (максимум 10 МБ)
4. Укажите получателей и тему
5. При необходимости установите уровень конфиденциальности

Если документ не отправляется:
- Проверьте интернет-соединение
- Убедитесь, что файл не поврежден
- Попробуйте уменьшить размер файла";

const CONNECTION: &str = "\
Проблемы с подключением:
1. Проверьте кабель Ethernet или Wi-Fi соединение
2. Перезагрузите сетевое оборудование
3. Проверьте настройки прокси-сервера
4. Убедитесь, что антивирус не блокирует соединение
5. Попробуйте подключиться к другой сети

Для VPN подключения:
- Используйте корпоративный VPN клиент
- Введите ваши учетные данные
- При проблемах обратитесь к сетевому администратору";

const SOFTWARE: &str = "\
Установка программного обеспечения:
1. Проверьте список разрешенного ПО в корпоративном каталоге
2. Подайте заявку через ServiceDesk
3. Укажите бизнес-обоснование для установки
4. Дождитесь одобрения от ИТ-службы
5. ПО будет установлено удаленно или вам будут предоставлены инструкции

Обновление ПО происходит автоматически через корпоративную систему управления.";

/// Look up the canned instructions for a category.
pub fn lookup(category: Category) -> Option<&'static str> {
    match category {
        Category::Password => Some(PASSWORD),
        Category::Access => Some(ACCESS),
        Category::Documents => Some(DOCUMENTS),
        Category::Connection => Some(CONNECTION),
        Category::Software => Some(SOFTWARE),
        Category::General => None,
    }
}

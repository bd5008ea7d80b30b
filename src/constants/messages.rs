//! Chat lines spoken by the math assistant (Vietnamese, teacher to pupil).

pub const INTRO_GREETING: &str = "Tối nay, cả lớp hãy tham gia thử thách '10 cửa ải toán học' với trợ lý Gemini. \
Mỗi câu hỏi được +10 điểm/câu, nếu trả lời sai cho phép làm lại 1 lần duy nhất, nếu làm lại đúng chỉ được +5 điểm. \
Bạn nào đạt được 100/100 điểm hãy chụp màn hình gửi cô nhé!";

pub const ASK_NAME: &str = "Trước tiên, cho cô biết tên của con là gì nào? 😊";

pub const QUIZ_READY: &str = "Bộ đề đã sẵn sàng! Chúng ta cùng bắt đầu với câu hỏi đầu tiên nhé! ⭐";

pub fn generating_quiz(name: &str) -> String {
    format!(
        "Tuyệt vời, {}! Cô đang tạo bộ đề cho con đây, chờ một chút nhé... ⏳",
        name
    )
}

pub fn quiz_failed(reason: &str) -> String {
    format!(
        "Rất tiếc, cô không thể tạo bộ đề mới ngay lúc này. Con hãy thử lại sau nhé! (Lỗi: {})",
        reason
    )
}

pub fn correct_answer(points: u32) -> String {
    format!("Tuyệt vời! Chính xác rồi, con được cộng {} điểm!", points)
}

pub fn hint(hint: &str) -> String {
    format!(
        "Xem lại nhé, chưa đúng rồi. Gợi ý của cô là:\n\n{}\n\nCon hãy thử lại một lần nữa xem nào!",
        hint
    )
}

pub fn incorrect_answer(correct_answer: &str, explanation: &str) -> String {
    format!(
        "Rất tiếc vẫn chưa đúng.\n\nĐáp án đúng là \"{}\". {}\n\nĐừng lo, chúng ta qua câu tiếp theo nhé!",
        correct_answer, explanation
    )
}

pub fn times_up(correct_answer: &str) -> String {
    format!(
        "Hết giờ rồi! Đáp án đúng là \"{}\".\n\nChúng ta qua câu tiếp theo nhé!",
        correct_answer
    )
}

pub fn summary(name: &str, score: u32, max_score: u32, tier_label: &str) -> String {
    format!(
        "🎉 Chúc mừng {} đã hoàn thành thử thách! 🎉\n\nTổng điểm của con là: {}/{}\nDanh hiệu của con: {}\n\nCon làm rất tốt! Hãy luôn giữ vững tinh thần học hỏi này nhé!",
        name, score, max_score, tier_label
    )
}

// The Q&A chat speaks English.

pub fn qa_failed(reason: &str) -> String {
    format!("Sorry, I encountered an error. Please try again. ({})", reason)
}

pub fn qa_error_flag(reason: &str) -> String {
    format!("Failed to get response from Gemini. {}", reason)
}

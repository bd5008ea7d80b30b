pub const QUIZ_GENERATION_PROMPT: &str = "Hãy tạo một bài kiểm tra trắc nghiệm gồm 10 câu hỏi toán học cho học sinh lớp 4 ở Việt Nam.
Các câu hỏi nên bao gồm các chủ đề sau: đọc và viết số lớn, giá trị của chữ số theo hàng và lớp, so sánh và sắp xếp số, làm tròn số, dãy số có quy luật, và các phép tính cơ bản (cộng, trừ, nhân, chia) với số tự nhiên.
QUAN TRỌNG: KHÔNG BAO GỒM các bài toán nhân một số có hai chữ số với một số có hai chữ số.
Mỗi câu hỏi phải có:
1.  \"question\": Nội dung câu hỏi.
2.  \"options\": Một mảng gồm đúng 4 chuỗi đáp án khác nhau.
3.  \"correctAnswer\": Chuỗi đáp án đúng (phải khớp chính xác với một trong các tùy chọn).
4.  \"hint\": Một gợi ý ngắn gọn.
5.  \"explanation\": Lời giải thích rõ ràng cho đáp án đúng.

Vui lòng trả lời dưới dạng một mảng JSON tuân thủ theo schema đã cung cấp.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt_names_every_field() {
        for field in ["question", "options", "correctAnswer", "hint", "explanation"] {
            assert!(QUIZ_GENERATION_PROMPT.contains(&format!("\"{}\"", field)));
        }
        assert!(QUIZ_GENERATION_PROMPT.contains("10 câu hỏi"));
    }
}

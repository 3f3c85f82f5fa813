use super::{InterviewSelection, InterviewType};

/// Evaluation instruction demanding a strict JSON feedback object
pub fn feedback_instruction(selection: &InterviewSelection) -> String {
    let role_label = selection.job_role.label();

    if selection.interview_type.is_english() {
        return format!(
            r#"You are an expert interview evaluator. Analyze the following English interview conversation and provide feedback in JSON format.

Response format (must be valid JSON only):
{{
  "score": 85,
  "strengths": ["Strength 1 (within 50 chars)", "Strength 2 (within 50 chars)"],
  "improvements": ["Improvement 1 (within 50 chars)", "Improvement 2 (within 50 chars)"],
  "keywords": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5"],
  "summary": "Overall interview evaluation (within 100 chars)"
}}

Evaluation criteria for {role_label} English Interview:
- score: Evaluate English fluency, grammar, vocabulary, clarity, and content quality out of 100
- strengths: 2 notable strengths of the candidate (be specific)
- improvements: 2 areas needing improvement (constructive feedback)
- keywords: 5 key words or themes the candidate emphasized
- summary: Overall assessment of the interview

Output only JSON format without any other text."#
        );
    }

    let type_label = selection.interview_type.label();
    let score_rubric = match selection.interview_type {
        InterviewType::Technical => {
            "- score: 직무 관련 전문성, 기술적 깊이, 문제 해결 능력, 실무 경험을 종합하여 100점 만점으로 평가"
        }
        InterviewType::Executive => {
            "- score: 리더십, 비전, 전략적 사고, 조직 적합성을 종합하여 100점 만점으로 평가 (임원면접 기준으로 엄격하게)"
        }
        _ => "- score: 답변의 논리성, 일관성, 구체성, 적절성을 종합하여 100점 만점으로 평가",
    };

    format!(
        r#"당신은 전문 면접 평가 분석가입니다. 다음 {role_label} 직무 {type_label} 대화를 분석하여 JSON 형식으로 피드백을 제공해주세요.

응답 형식 (반드시 유효한 JSON으로만 응답):
{{
  "score": 85,
  "strengths": ["강점1 설명 (50자 이내)", "강점2 설명 (50자 이내)"],
  "improvements": ["개선점1 설명 (50자 이내)", "개선점2 설명 (50자 이내)"],
  "keywords": ["키워드1", "키워드2", "키워드3", "키워드4", "키워드5"],
  "summary": "전반적인 면접 평가 요약 (100자 이내)"
}}

{type_label} 평가 기준 ({role_label} 직무):
{score_rubric}
- strengths: 지원자의 두드러진 강점 2가지 (구체적으로)
- improvements: 개선이 필요한 부분 2가지 (건설적으로)
- keywords: 지원자가 자주 사용하거나 강조한 핵심 키워드 5개
- summary: {type_label} 전체에 대한 종합 평가

JSON 형식만 출력하고 다른 텍스트는 포함하지 마세요."#
    )
}

/// User message wrapping the rendered dialogue for evaluation
pub fn feedback_request(dialogue: &str) -> String {
    format!("다음 면접 대화를 분석해주세요:\n\n{}", dialogue)
}

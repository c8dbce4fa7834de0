/// A representative assistant reply: markdown-ish Korean billing breakdown,
/// the shape the agent produces for a single-month statement lookup.
pub fn billing_reply_fixture() -> &'static str {
    return r#"
2026년 2월 청구 상세 내역입니다.

- 기본료: 29,900원
- 초과 이용료: 12,000원 (API 호출 한도 초과)
- 부가/소액결제: 3,300원 (프리미엄 리포트)
- 할인액: -5,000원

**프로** 요금제 기준으로 계산되었으며, 다음 결제일은 3월 1일입니다.

💰 총 청구 금액: 40,200원
"#
    .trim();
}

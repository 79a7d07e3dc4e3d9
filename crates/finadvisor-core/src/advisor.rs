//! The simulated financial advisor
//!
//! Response selection is an ordered table of (trigger set, canned response)
//! pairs: the first trigger found in the lower-cased input wins, and the
//! generic fallback closes the table. The order is load-bearing for output
//! compatibility ("tax loan" answers with the tax block, not the loan one).

use std::time::Duration;

const TAX_RESPONSE: &str = "I can help you with tax optimization! Here are some key strategies:\n\n• **Maximize deductions**: Consider itemizing if it exceeds the standard deduction\n• **Retirement contributions**: Max out 401(k) and IRA contributions\n• **Tax-loss harvesting**: Offset gains with losses in your investment portfolio\n• **HSA contributions**: Triple tax advantage for health savings\n\nWhat specific tax situation would you like me to analyze?";

const INVEST_RESPONSE: &str = "Great question about investing! Here's a strategic approach:\n\n• **Diversification**: Spread investments across asset classes\n• **Emergency fund first**: 3-6 months of expenses in high-yield savings\n• **Low-cost index funds**: Broad market exposure with minimal fees\n• **Dollar-cost averaging**: Regular investments regardless of market conditions\n• **Rebalancing**: Maintain your target allocation quarterly\n\nWhat's your investment timeline and risk tolerance?";

const DEBT_RESPONSE: &str = "Let me help you tackle debt strategically:\n\n• **List all debts**: Include balances, rates, and minimum payments\n• **Avalanche method**: Pay minimums on all, extra on highest rate\n• **Snowball method**: Pay minimums on all, extra on smallest balance\n• **Consolidation**: Consider if you can get a lower rate\n• **Refinancing**: Especially for mortgages and student loans\n\nWhat types of loans are you currently managing?";

const BUDGET_RESPONSE: &str = "Budgeting is the foundation of financial success! Here's my recommended approach:\n\n• **50/30/20 Rule**: 50% needs, 30% wants, 20% savings/debt\n• **Track everything**: Use apps or spreadsheets for 30 days\n• **Automate savings**: Pay yourself first\n• **Review monthly**: Adjust categories based on actual spending\n• **Build emergency fund**: Start with $1,000, then 3-6 months expenses\n\nWould you like help creating a personalized budget?";

const FALLBACK_RESPONSE: &str = "Thank you for your question! I specialize in comprehensive financial advice including:\n\n• **Tax Planning & Optimization**\n• **Investment Strategy & Portfolio Management**\n• **Debt Management & Loan Optimization**\n• **Budgeting & Financial Planning**\n• **Retirement Planning**\n• **Risk Assessment & Insurance**\n\nCould you provide more details about your specific financial situation so I can give you personalized advice?";

/// Trigger table, evaluated top to bottom. First match wins.
const RESPONSES: &[(&[&str], &str)] = &[
    (&["tax"], TAX_RESPONSE),
    (&["invest"], INVEST_RESPONSE),
    (&["loan", "debt"], DEBT_RESPONSE),
    (&["budget", "money"], BUDGET_RESPONSE),
];

/// Pick the canned response for a user message. Total function: any input,
/// including empty, maps to exactly one response.
pub fn select_response(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    RESPONSES
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| lowered.contains(t)))
        .map(|(_, response)| *response)
        .unwrap_or(FALLBACK_RESPONSE)
}

pub fn fallback_response() -> &'static str {
    FALLBACK_RESPONSE
}

/// The simulated advisor engine. `respond` stands where a provider client's
/// query call would: it waits out the configured "thinking" delay on the
/// tokio clock, then answers from the canned response table.
#[derive(Debug, Clone)]
pub struct Advisor {
    delay: Duration,
}

impl Advisor {
    /// Reply latency used when no override is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn respond(&self, message: &str) -> String {
        tokio::time::sleep(self.delay).await;
        select_response(message).to_string()
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_keyword_selects_tax_response() {
        assert_eq!(select_response("How do I lower my tax bill?"), TAX_RESPONSE);
        assert_eq!(select_response("TAX!"), TAX_RESPONSE);
        // Substring containment, not word match: "taxes" still triggers.
        assert_eq!(select_response("what about taxes"), TAX_RESPONSE);
    }

    #[test]
    fn each_trigger_selects_its_category() {
        assert_eq!(select_response("should I invest in index funds"), INVEST_RESPONSE);
        assert_eq!(select_response("I have a car loan"), DEBT_RESPONSE);
        assert_eq!(select_response("drowning in debt"), DEBT_RESPONSE);
        assert_eq!(select_response("help me budget"), BUDGET_RESPONSE);
        assert_eq!(select_response("where does my money go"), BUDGET_RESPONSE);
    }

    #[test]
    fn priority_order_breaks_ties() {
        // Declaration order of the table decides multi-keyword inputs.
        assert_eq!(select_response("tax loan"), TAX_RESPONSE);
        assert_eq!(select_response("loan tax"), TAX_RESPONSE);
        assert_eq!(select_response("invest my money"), INVEST_RESPONSE);
        assert_eq!(select_response("budget for my student loan"), DEBT_RESPONSE);
        assert_eq!(
            select_response("What about my 401k investments and tax deductions?"),
            TAX_RESPONSE
        );
    }

    #[test]
    fn unknown_input_falls_back() {
        assert_eq!(select_response("hello"), FALLBACK_RESPONSE);
        assert_eq!(select_response(""), FALLBACK_RESPONSE);
        assert_eq!(select_response("what's the weather like"), FALLBACK_RESPONSE);
    }

    #[tokio::test(start_paused = true)]
    async fn respond_waits_out_the_configured_delay() {
        let advisor = Advisor::new(Duration::from_millis(1500));

        let reply = tokio::spawn({
            let advisor = advisor.clone();
            async move { advisor.respond("tax question").await }
        });
        tokio::task::yield_now().await; // let the task park on its timer

        // Just short of the delay the reply is still pending.
        tokio::time::advance(Duration::from_millis(1499)).await;
        assert!(!reply.is_finished());

        tokio::time::advance(Duration::from_millis(1)).await;
        let response = reply.await.unwrap();
        assert_eq!(response, TAX_RESPONSE);
    }
}

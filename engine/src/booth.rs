use log::{debug, trace};

use crate::bits::Bits;
use crate::error::RangeError;

/// Operand width in bits. The loop runs exactly this many iterations.
pub const OPERAND_WIDTH: u32 = 4;

/// Accumulator width. One bit wider than the operands: the negation of
/// the most negative operand has no encoding at the operand width.
pub const ACCUMULATOR_WIDTH: u32 = OPERAND_WIDTH + 1;

/// The accumulator operation selected by one recode decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepAction {
    /// Pattern 01: A = A + M.
    AddMultiplicand,
    /// Pattern 10: A = A - M, performed by adding the negated multiplicand.
    SubtractMultiplicand,
    /// Patterns 00 and 11: the accumulator is left unchanged.
    None,
}

impl std::fmt::Display for StepAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepAction::AddMultiplicand => write!(f, "A = A + M"),
            StepAction::SubtractMultiplicand => write!(f, "A = A - M"),
            StepAction::None => write!(f, "No operation"),
        }
    }
}

/// One recorded iteration of the multiplier loop.
///
/// The `*_before` fields hold the register values at the start of the
/// iteration, before the recode decision is applied. The `*_after`
/// fields hold the values after the combined right shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceStep {
    /// 1-based iteration number.
    pub index: u32,
    pub a_before: Bits,
    pub q_before: Bits,
    pub q_minus_1_before: Bits,
    /// The examined pattern: LSB of Q, then the guard bit.
    pub recode: Bits,
    pub action: StepAction,
    pub a_after: Bits,
    pub q_after: Bits,
    pub q_minus_1_after: Bits,
}

/// The structured result of one multiplication run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Multiplication {
    pub multiplicand: i32,
    pub multiplier: i32,
    /// Decimal product, decoded from `product_bits`.
    pub product: i32,
    /// The 8-bit two's complement image of the product.
    pub product_bits: Bits,
    /// One entry per iteration, in order.
    pub steps: Vec<TraceStep>,
    /// Multiplicand at accumulator width, fixed through the run.
    pub m: Bits,
    /// Negated multiplicand at accumulator width, fixed through the run.
    pub neg_m: Bits,
    /// The multiplier's operand-width encoding, before any shifting.
    pub q_initial: Bits,
}

/// Register state for one multiplication run.
#[derive(Clone, Copy)]
struct BoothState {
    a: Bits,
    q: Bits,
    q_minus_1: Bits,
}

impl BoothState {
    fn new(q_initial: Bits) -> Self {
        BoothState {
            a: Bits::zero(ACCUMULATOR_WIDTH),
            q: q_initial,
            q_minus_1: Bits::zero(1),
        }
    }

    /// The two-bit recode pattern: LSB of Q, then the guard bit.
    fn recode(&self) -> Bits {
        Bits::new(
            ((self.q.lsb() as u16) << 1) | self.q_minus_1.lsb() as u16,
            2,
        )
    }

    /// One arithmetic right shift across the combined A || Q || Q-1
    /// register: A keeps its sign, A's vacated LSB enters the top of Q,
    /// and Q's LSB becomes the guard bit.
    fn shift(&self) -> BoothState {
        BoothState {
            a: self.a.shift_right_arithmetic(),
            q: self.q.shift_right_into(self.a.lsb()),
            q_minus_1: Bits::new(self.q.lsb() as u16, 1),
        }
    }
}

/// Multiplies two 4-bit signed operands with Booth's algorithm,
/// recording the register state of every iteration.
///
/// Fails with [`RangeError`] when either operand is outside [-8, 7].
/// The check happens before any register state is built, so a failed
/// call produces no partial trace.
pub fn multiply(multiplicand: i32, multiplier: i32) -> Result<Multiplication, RangeError> {
    let m_operand = Bits::encode(multiplicand, OPERAND_WIDTH)?;
    let q_initial = Bits::encode(multiplier, OPERAND_WIDTH)?;

    let m = m_operand.sign_extend(ACCUMULATOR_WIDTH);
    let neg_m = Bits::encode(-multiplicand, ACCUMULATOR_WIDTH)?;

    debug!("multiply {multiplicand} x {multiplier}: M={m} -M={neg_m} Q={q_initial}");

    let mut state = BoothState::new(q_initial);
    let mut steps = Vec::with_capacity(OPERAND_WIDTH as usize);

    for index in 1..=OPERAND_WIDTH {
        let recode = state.recode();
        let action = match (state.q.lsb(), state.q_minus_1.lsb()) {
            (0, 1) => StepAction::AddMultiplicand,
            (1, 0) => StepAction::SubtractMultiplicand,
            _ => StepAction::None,
        };

        let before = state;

        state.a = match action {
            StepAction::AddMultiplicand => state.a.add_mod(m),
            StepAction::SubtractMultiplicand => state.a.add_mod(neg_m),
            StepAction::None => state.a,
        };

        let after = state.shift();

        trace!(
            "step {index}: pattern {recode}, {action}, A={} Q={} Q-1={}",
            after.a,
            after.q,
            after.q_minus_1
        );

        steps.push(TraceStep {
            index,
            a_before: before.a,
            q_before: before.q,
            q_minus_1_before: before.q_minus_1,
            recode,
            action,
            a_after: after.a,
            q_after: after.q,
            q_minus_1_after: after.q_minus_1,
        });

        state = after;
    }

    // The product lives in A || Q. Products of 4-bit operands fit in
    // 8 bits, so the 9-bit register and its low 8 bits decode alike.
    let product_bits = state.a.concat(state.q).truncate(2 * OPERAND_WIDTH);
    let product = product_bits.decode();

    debug!("{multiplicand} x {multiplier} = {product} ({product_bits})");

    Ok(Multiplication {
        multiplicand,
        multiplier,
        product,
        product_bits,
        steps,
        m,
        neg_m,
        q_initial,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_when_three_times_minus_four_then_minus_twelve() {
        let result = multiply(3, -4).unwrap();

        assert_eq!(result.product, -12);
        assert_eq!(result.product_bits.to_string(), "11110100");
    }

    #[test]
    fn multiply_when_operand_out_of_range_then_range_error() {
        assert_eq!(
            multiply(8, 0),
            Err(RangeError { value: 8, width: 4 })
        );
        assert_eq!(
            multiply(0, -9),
            Err(RangeError { value: -9, width: 4 })
        );
    }

    #[test]
    fn multiply_when_valid_operands_then_four_steps() {
        let result = multiply(5, 5).unwrap();

        assert_eq!(result.steps.len(), 4);
        for (i, step) in result.steps.iter().enumerate() {
            assert_eq!(step.index as usize, i + 1);
            assert_eq!(step.a_before.width(), ACCUMULATOR_WIDTH);
            assert_eq!(step.a_after.width(), ACCUMULATOR_WIDTH);
            assert_eq!(step.q_before.width(), OPERAND_WIDTH);
            assert_eq!(step.q_after.width(), OPERAND_WIDTH);
            assert_eq!(step.q_minus_1_before.width(), 1);
            assert_eq!(step.q_minus_1_after.width(), 1);
            assert_eq!(step.recode.width(), 2);
        }
    }

    #[test]
    fn multiply_when_minus_three_times_one_then_one_sub_one_add() {
        let result = multiply(-3, 1).unwrap();

        let actions: Vec<StepAction> = result.steps.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                StepAction::SubtractMultiplicand,
                StepAction::AddMultiplicand,
                StepAction::None,
                StepAction::None,
            ]
        );
        assert_eq!(result.product, -3);
    }

    #[test]
    fn multiply_when_zero_multiplicand_then_accumulator_never_changes() {
        let result = multiply(0, 5).unwrap();

        assert_eq!(result.product, 0);
        for step in &result.steps {
            assert_eq!(step.a_before.to_string(), "00000");
            assert_eq!(step.a_after.to_string(), "00000");
        }
    }

    #[test]
    fn multiply_when_most_negative_multiplicand_then_negation_representable() {
        let result = multiply(-8, 1).unwrap();

        assert_eq!(result.m.to_string(), "11000");
        assert_eq!(result.neg_m.to_string(), "01000");
        assert_eq!(result.product, -8);
    }

    #[test]
    fn multiply_when_run_constants_then_fixed_widths() {
        let result = multiply(3, -4).unwrap();

        assert_eq!(result.m.width(), ACCUMULATOR_WIDTH);
        assert_eq!(result.neg_m.width(), ACCUMULATOR_WIDTH);
        assert_eq!(result.q_initial.width(), OPERAND_WIDTH);
        assert_eq!(result.q_initial.to_string(), "1100");
    }

    #[test]
    fn step_action_display_when_formatted_then_operation_names() {
        assert_eq!(StepAction::AddMultiplicand.to_string(), "A = A + M");
        assert_eq!(StepAction::SubtractMultiplicand.to_string(), "A = A - M");
        assert_eq!(StepAction::None.to_string(), "No operation");
    }
}

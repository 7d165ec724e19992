/// Fixed mapping from the site's payment-method codes to display names.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentCodeTable;

const PAYMENT_METHODS: &[(i64, &str)] = &[
    (1, "Visa"),
    (2, "Master"),
    (3, "Cash"),
    (4, "AE"),
    (5, "JCB"),
    (6, "Octopus"),
    (7, "China UnionPay"),
    (8, "EPS"),
    (9, "Diners Club"),
    (10, "Apple Pay"),
    (11, "AlipayHK"),
    (12, "WeChat Pay"),
    (13, "Google Pay"),
    (14, "PayMe"),
    (15, "FPS"),
];

impl PaymentCodeTable {
    pub fn name(&self, code: i64) -> Option<&'static str> {
        PAYMENT_METHODS
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, name)| *name)
    }
}

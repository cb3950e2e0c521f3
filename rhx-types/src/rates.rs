use serde::Serialize;

/// Допуск (в процентах) при сопоставлении прочитанного значения с
/// аппаратным перечислением.
pub const NEAREST_TOLERANCE_PCT: f64 = 1.0;

/// Аппаратно поддерживаемые частоты дискретизации усилителей
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SampleRate {
    Hz1000,
    Hz1250,
    Hz1500,
    Hz2000,
    Hz2500,
    Hz3000,
    Hz3333,
    Hz4000,
    Hz5000,
    Hz6250,
    Hz8000,
    Hz10000,
    Hz12500,
    Hz15000,
    Hz20000,
    Hz25000,
    Hz30000,
}

/// Допустимые шаги тока стимуляции (RHS)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StimStepSize {
    Na10,
    Na20,
    Na50,
    Na100,
    Na200,
    Na500,
    Ua1,
    Ua2,
    Ua5,
    Ua10,
}

impl SampleRate {
    pub const ALL: [SampleRate; 17] = [
        SampleRate::Hz1000,
        SampleRate::Hz1250,
        SampleRate::Hz1500,
        SampleRate::Hz2000,
        SampleRate::Hz2500,
        SampleRate::Hz3000,
        SampleRate::Hz3333,
        SampleRate::Hz4000,
        SampleRate::Hz5000,
        SampleRate::Hz6250,
        SampleRate::Hz8000,
        SampleRate::Hz10000,
        SampleRate::Hz12500,
        SampleRate::Hz15000,
        SampleRate::Hz20000,
        SampleRate::Hz25000,
        SampleRate::Hz30000,
    ];

    /// Частота в герцах.
    pub fn hz(&self) -> f64 {
        match self {
            SampleRate::Hz1000 => 1000.0,
            SampleRate::Hz1250 => 1250.0,
            SampleRate::Hz1500 => 1500.0,
            SampleRate::Hz2000 => 2000.0,
            SampleRate::Hz2500 => 2500.0,
            SampleRate::Hz3000 => 3000.0,
            SampleRate::Hz3333 => 10_000.0 / 3.0,
            SampleRate::Hz4000 => 4000.0,
            SampleRate::Hz5000 => 5000.0,
            SampleRate::Hz6250 => 6250.0,
            SampleRate::Hz8000 => 8000.0,
            SampleRate::Hz10000 => 10_000.0,
            SampleRate::Hz12500 => 12_500.0,
            SampleRate::Hz15000 => 15_000.0,
            SampleRate::Hz20000 => 20_000.0,
            SampleRate::Hz25000 => 25_000.0,
            SampleRate::Hz30000 => 30_000.0,
        }
    }

    /// Ближайшая аппаратная частота в пределах [`NEAREST_TOLERANCE_PCT`].
    pub fn nearest(rate: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| within_tolerance(rate, candidate.hz()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SampleRate::Hz1000 => "1.00 kS/s",
            SampleRate::Hz1250 => "1.25 kS/s",
            SampleRate::Hz1500 => "1.50 kS/s",
            SampleRate::Hz2000 => "2.00 kS/s",
            SampleRate::Hz2500 => "2.50 kS/s",
            SampleRate::Hz3000 => "3.00 kS/s",
            SampleRate::Hz3333 => "3.33 kS/s",
            SampleRate::Hz4000 => "4.00 kS/s",
            SampleRate::Hz5000 => "5.00 kS/s",
            SampleRate::Hz6250 => "6.25 kS/s",
            SampleRate::Hz8000 => "8.00 kS/s",
            SampleRate::Hz10000 => "10.0 kS/s",
            SampleRate::Hz12500 => "12.5 kS/s",
            SampleRate::Hz15000 => "15.0 kS/s",
            SampleRate::Hz20000 => "20.0 kS/s",
            SampleRate::Hz25000 => "25.0 kS/s",
            SampleRate::Hz30000 => "30.0 kS/s",
        }
    }
}

impl StimStepSize {
    pub const ALL: [StimStepSize; 10] = [
        StimStepSize::Na10,
        StimStepSize::Na20,
        StimStepSize::Na50,
        StimStepSize::Na100,
        StimStepSize::Na200,
        StimStepSize::Na500,
        StimStepSize::Ua1,
        StimStepSize::Ua2,
        StimStepSize::Ua5,
        StimStepSize::Ua10,
    ];

    /// Шаг тока в амперах (в файле хранится именно так).
    pub fn amps(&self) -> f64 {
        match self {
            StimStepSize::Na10 => 10e-9,
            StimStepSize::Na20 => 20e-9,
            StimStepSize::Na50 => 50e-9,
            StimStepSize::Na100 => 100e-9,
            StimStepSize::Na200 => 200e-9,
            StimStepSize::Na500 => 500e-9,
            StimStepSize::Ua1 => 1e-6,
            StimStepSize::Ua2 => 2e-6,
            StimStepSize::Ua5 => 5e-6,
            StimStepSize::Ua10 => 10e-6,
        }
    }

    /// Ближайший допустимый шаг в пределах [`NEAREST_TOLERANCE_PCT`].
    pub fn nearest(amps: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| within_tolerance(amps, candidate.amps()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            StimStepSize::Na10 => "10 nA",
            StimStepSize::Na20 => "20 nA",
            StimStepSize::Na50 => "50 nA",
            StimStepSize::Na100 => "100 nA",
            StimStepSize::Na200 => "200 nA",
            StimStepSize::Na500 => "500 nA",
            StimStepSize::Ua1 => "1 µA",
            StimStepSize::Ua2 => "2 µA",
            StimStepSize::Ua5 => "5 µA",
            StimStepSize::Ua10 => "10 µA",
        }
    }
}

// Относительное отклонение считается от прочитанного значения; для 0 и NaN
// сравнение всегда ложно.
fn within_tolerance(
    value: f64,
    candidate: f64,
) -> bool {
    ((value - candidate) / value).abs() * 100.0 < NEAREST_TOLERANCE_PCT
}

impl std::fmt::Display for SampleRate {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for StimStepSize {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

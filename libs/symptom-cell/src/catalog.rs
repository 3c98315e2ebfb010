use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::{Medicine, Symptom, SymptomCategory};

static SYMPTOMS: Lazy<Vec<Symptom>> = Lazy::new(|| {
    use SymptomCategory::*;

    [
        ("fever", "Fever", General),
        ("cough", "Cough", Respiratory),
        ("chest_pain", "Chest Pain", Cardiac),
        ("nausea", "Nausea", Digestive),
        ("headache", "Headache", Neurological),
        ("fatigue", "Fatigue", General),
        ("stomach_pain", "Stomach Pain", Digestive),
        ("shortness_breath", "Shortness of Breath", Respiratory),
        ("dizziness", "Dizziness", Neurological),
        ("muscle_pain", "Muscle Pain", Musculoskeletal),
    ]
    .into_iter()
    .map(|(id, name, category)| Symptom { id, name, category })
    .collect()
});

static MEDICINES: Lazy<HashMap<&'static str, Vec<Medicine>>> = Lazy::new(build_medicines);

/// The selectable symptoms, in display order.
pub fn symptoms() -> &'static [Symptom] {
    &SYMPTOMS
}

pub fn find_symptom(id: &str) -> Option<&'static Symptom> {
    SYMPTOMS.iter().find(|s| s.id == id)
}

/// Suggestions for one symptom. Unknown ids have none.
pub fn medicines_for(symptom_id: &str) -> &'static [Medicine] {
    MEDICINES.get(symptom_id).map(Vec::as_slice).unwrap_or(&[])
}

fn medicine(name: &str, dosage: &str, usage: &str, precautions: &str) -> Medicine {
    Medicine {
        name: name.to_string(),
        dosage: dosage.to_string(),
        usage: usage.to_string(),
        precautions: precautions.to_string(),
    }
}

fn build_medicines() -> HashMap<&'static str, Vec<Medicine>> {
    HashMap::from([
        ("fever", vec![
            medicine("Paracetamol", "500mg", "Every 6-8 hours", "Do not exceed 4g per day"),
            medicine("Ibuprofen", "200mg", "Every 6-8 hours", "Take with food"),
        ]),
        ("cough", vec![
            medicine("Dextromethorphan", "15mg", "Every 4 hours", "Avoid with MAO inhibitors"),
            medicine("Honey", "1 tsp", "2-3 times daily", "Not for children under 1 year"),
        ]),
        ("chest_pain", vec![
            medicine("Aspirin", "81mg", "Once daily", "Consult doctor for chest pain"),
            medicine("Nitroglycerin", "As prescribed", "Emergency use only", "Prescription required"),
        ]),
        ("nausea", vec![
            medicine("Ondansetron", "4mg", "Every 8 hours", "Prescription required"),
            medicine("Ginger", "250mg", "3 times daily", "Natural remedy"),
        ]),
        ("headache", vec![
            medicine("Acetaminophen", "325mg", "Every 4-6 hours", "Do not exceed daily limit"),
            medicine("Aspirin", "325mg", "Every 4 hours", "Not for children with fever"),
        ]),
        ("fatigue", vec![
            medicine("Vitamin B12", "1000mcg", "Once daily", "Supplement as needed"),
            medicine("Iron", "65mg", "Once daily", "Take with Vitamin C"),
        ]),
        ("stomach_pain", vec![
            medicine("Antacid", "10ml", "After meals", "Do not exceed 6 doses per day"),
            medicine("Simethicone", "40mg", "After meals", "For gas-related pain"),
        ]),
        ("shortness_breath", vec![
            medicine("Albuterol", "As prescribed", "Emergency inhaler", "Seek immediate medical attention"),
            medicine("Oxygen", "As needed", "Medical supervision", "Emergency use only"),
        ]),
        ("dizziness", vec![
            medicine("Meclizine", "25mg", "Every 6 hours", "May cause drowsiness"),
            medicine("Dramamine", "50mg", "Every 4-6 hours", "For motion sickness"),
        ]),
        ("muscle_pain", vec![
            medicine("Ibuprofen", "400mg", "Every 6-8 hours", "Take with food"),
            medicine("Topical Cream", "Apply thin layer", "3-4 times daily", "For external use only"),
        ]),
    ])
}

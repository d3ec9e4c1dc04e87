//! Default data substituted for empty or unreadable slots.

use crate::models::{EmergencyContact, Person, VotingCenter};

pub fn default_emergency_contact() -> EmergencyContact {
    EmergencyContact {
        name: "ক্যাম্প কমান্ডার".to_string(),
        mobile: "01712345678".to_string(),
    }
}

fn person(id: &str, name: &str, designation: &str, mobile: &str) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        designation: designation.to_string(),
        mobile: mobile.to_string(),
    }
}

pub fn default_centers() -> Vec<VotingCenter> {
    vec![
        VotingCenter {
            id: "1".to_string(),
            center_number: "01".to_string(),
            name: "পতেঙ্গা উচ্চ বিদ্যালয়".to_string(),
            booth_count: "10".to_string(),
            voter_count: "4000".to_string(),
            room_location: "প্রধান ভবন, ২য় তলা".to_string(),
            location_link: "https://maps.app.goo.gl/3Xp5Y6rJ7k9L8m2n1".to_string(),
            important_persons: vec![
                person("p1", "লেঃ কর্নেল মাহমুদ", "ক্যাম্প কমান্ডার", "01712345678"),
                person("p2", "মেজর সাঈদ", "অপারেশন অফিসার", "01812345679"),
            ],
        },
        VotingCenter {
            id: "2".to_string(),
            center_number: "02".to_string(),
            name: "ইপিজেড পাবলিক স্কুল অ্যান্ড কলেজ".to_string(),
            booth_count: "15".to_string(),
            voter_count: "6200".to_string(),
            room_location: "এ-ব্লক মাঠ সংলগ্ন".to_string(),
            location_link: "https://maps.app.goo.gl/8vU1mN2b3v4c5x6z7".to_string(),
            important_persons: vec![
                person("p3", "ক্যাপ্টেন ফয়সাল", "সেক্টর ইনচার্জ", "01912345680"),
                person("p4", "ওয়ারেন্ট অফিসার আজিজ", "লজিস্টিক ইনচার্জ", "01512345681"),
            ],
        },
        VotingCenter {
            id: "3".to_string(),
            center_number: "03".to_string(),
            name: "বন্দর নগরী সরকারি প্রাথমিক বিদ্যালয়".to_string(),
            booth_count: "08".to_string(),
            voter_count: "3200".to_string(),
            room_location: "বন্দর গেট সংলগ্ন".to_string(),
            location_link: "https://maps.app.goo.gl/9Q1w2e3r4t5y6u7i8".to_string(),
            important_persons: vec![person("p5", "লেঃ রফিক", "পেট্রোল কমান্ডার", "01312345682")],
        },
    ]
}

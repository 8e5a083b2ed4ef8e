use chrono::NaiveDate;
use meetlog_core::domain::{Contact, ContactId, Meeting, MeetingId};
use meetlog_core::time::start_of_day_utc;

/// Demonstration meetings loaded on start unless disabled, most-recent-first.
pub fn sample_meetings() -> Vec<Meeting> {
    vec![
        sample(
            "Delta Endüstri Ürünleri",
            day(2025, 11, 28),
            vec![
                contact(
                    "Zeynep Şahin",
                    "Genel Müdür",
                    "+90 532 111 2233",
                    "zeynep@delta.com",
                ),
                contact(
                    "Murat Arslan",
                    "Satın Alma Müdürü",
                    "+90 532 444 5566",
                    "murat@delta.com",
                ),
            ],
            "Ahmet Yılmaz, Ayşe Kaya",
            "Mevcut makinelerin bakım ve yedek parça desteği konusunda görüşme yapıldı. \
             Aynelik işleme makinesi için teknik destek talebi.",
            false,
            false,
        ),
        sample(
            "XYZ Metal İşleme A.Ş.",
            day(2025, 11, 25),
            vec![contact(
                "Ahmet Kaya",
                "Üretim Müdürü",
                "+90 532 777 8899",
                "ahmet@xyzmetal.com",
            )],
            "Mehmet Demir",
            "Yeni açılacak olan tesisleri için kapsamlı makine parkuru ihtiyaçları değerlendirildi.",
            true,
            false,
        ),
        sample(
            "ABC Makine San. Tic. Ltd. Şti.",
            day(2025, 11, 20),
            vec![
                contact(
                    "Ahmet Kaya",
                    "Genel Müdür",
                    "+90 532 123 4567",
                    "ahmet@abcmakine.com",
                ),
                contact(
                    "Zeynep Şahin",
                    "Teknik Müdür",
                    "+90 532 987 6543",
                    "zeynep@abcmakine.com",
                ),
            ],
            "Mehmet Yıldız, Can Öztürk",
            "CNC torna makinesi ihtiyaçları hakkında detaylı görüşme yapıldı. \
             Şirket mevcut 3 farklı tedarikçiden de teklif almış durumda.",
            true,
            true,
        ),
    ]
}

fn sample(
    company_name: &str,
    date: NaiveDate,
    contacts: Vec<Contact>,
    our_attendees: &str,
    content: &str,
    proposal_given: bool,
    follow_up_done: bool,
) -> Meeting {
    Meeting {
        id: MeetingId::new(),
        company_name: company_name.to_string(),
        date,
        contacts,
        our_attendees: our_attendees.to_string(),
        content: content.to_string(),
        proposal_given,
        proposal_rejection_reason: None,
        follow_up_done,
        created_at: start_of_day_utc(date),
    }
}

fn contact(name: &str, title: &str, phone: &str, email: &str) -> Contact {
    Contact {
        id: ContactId::new(),
        name: name.to_string(),
        title: title.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    }
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid sample date")
}

#[cfg(test)]
mod tests {
    use super::sample_meetings;

    #[test]
    fn sample_meetings_are_valid_and_newest_first() {
        let meetings = sample_meetings();
        assert_eq!(meetings.len(), 3);
        for meeting in &meetings {
            meeting.validate().expect("valid sample");
        }
        assert!(meetings.windows(2).all(|pair| pair[0].date > pair[1].date));
    }
}

use taskmaster_core::{
  Error, SubjectId, TaskId,
  error::Resource,
  task::{NewTask, Priority, TaskStatus, TaskUpdate},
};

use super::{in_days, manager, signed_in, subject, switch_to, task, today};

#[tokio::test]
async fn create_task_starts_pending() {
  let (m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let s = subject(&m, "Química").await;

  let input = NewTask::new("  Informe de laboratorio ", Priority::High, in_days(3), s.subject_id)
    .with_description("Entregar en PDF");
  let created = m.create_task(input).await.unwrap();

  assert_eq!(created.title, "Informe de laboratorio");
  assert_eq!(created.description.as_deref(), Some("Entregar en PDF"));
  assert_eq!(created.priority, Priority::High);
  assert_eq!(created.status, TaskStatus::Pending);
  assert_eq!(created.subject_id, s.subject_id);
}

#[tokio::test]
async fn create_task_requires_an_active_user() {
  let m = manager().await;
  let input = NewTask::new("Informe", Priority::Low, today(), SubjectId::new(1));
  let err = m.create_task(input).await.unwrap_err();
  assert!(matches!(err, Error::NoActiveUser));
}

#[tokio::test]
async fn due_date_may_be_today_but_not_yesterday() {
  let (m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let s = subject(&m, "Química").await;

  let yesterday = today().pred_opt().unwrap();
  let err = m
    .create_task(NewTask::new("Atrasada", Priority::Low, yesterday, s.subject_id))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidDate(d) if d == yesterday));

  m.create_task(NewTask::new("Para hoy", Priority::Low, today(), s.subject_id))
    .await
    .unwrap();
}

#[tokio::test]
async fn create_task_validates_text_fields() {
  let (m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let s = subject(&m, "Química").await;

  let err = m
    .create_task(NewTask::new("ab", Priority::Low, today(), s.subject_id))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidTitle(_)));

  let long = "x".repeat(501);
  let err = m
    .create_task(
      NewTask::new("Informe", Priority::Low, today(), s.subject_id).with_description(long),
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidDescription { len: 501, max: 500 }));

  assert!(m.list_tasks(s.subject_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_task_under_foreign_or_missing_subject_fails() {
  let (mut m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let anas = subject(&m, "Química").await;
  switch_to(&mut m, "Luis Gómez", "luis@mail.com").await;

  let err = m
    .create_task(NewTask::new("Intruso", Priority::Low, today(), anas.subject_id))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotOwned(Resource::Subject(_))));

  let err = m
    .create_task(NewTask::new("Huérfana", Priority::Low, today(), SubjectId::new(999)))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::SubjectNotFound(_)));
}

#[tokio::test]
async fn mark_and_unmark_are_guarded_transitions() {
  let (m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let s = subject(&m, "Química").await;
  let t = task(&m, &s, "Informe").await;
  let id = t.task_id;

  let err = m.unmark_task(id).await.unwrap_err();
  assert!(matches!(err, Error::AlreadyPending(x) if x == id));

  let done = m.mark_task(id).await.unwrap();
  assert_eq!(done.status, TaskStatus::Completed);

  let err = m.mark_task(id).await.unwrap_err();
  assert!(matches!(err, Error::AlreadyCompleted(x) if x == id));
  assert_eq!(m.select_task(id).await.unwrap().unwrap().status, TaskStatus::Completed);

  let again = m.unmark_task(id).await.unwrap();
  assert_eq!(again.status, TaskStatus::Pending);
  assert_eq!(again.title, t.title);
}

#[tokio::test]
async fn missing_task_is_not_found() {
  let (m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let id = TaskId::new(77);

  assert!(matches!(m.mark_task(id).await, Err(Error::TaskNotFound(_))));
  assert!(matches!(m.delete_task(id).await, Err(Error::TaskNotFound(_))));
  assert!(matches!(
    m.edit_task(id, TaskUpdate { title: Some("Nuevo".into()), ..Default::default() })
      .await,
    Err(Error::TaskNotFound(_))
  ));
  assert!(m.select_task(id).await.unwrap().is_none());
}

#[tokio::test]
async fn other_users_tasks_are_off_limits_and_untouched() {
  let (mut m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let s = subject(&m, "Química").await;
  let t = task(&m, &s, "Informe").await;
  let id = t.task_id;
  switch_to(&mut m, "Luis Gómez", "luis@mail.com").await;

  let owned = |err: Error| matches!(err, Error::NotOwned(Resource::Task(x)) if x == id);

  assert!(owned(m.mark_task(id).await.unwrap_err()));
  assert!(owned(
    m.edit_task(id, TaskUpdate { title: Some("Robado".into()), ..Default::default() })
      .await
      .unwrap_err()
  ));
  assert!(owned(m.delete_task(id).await.unwrap_err()));

  assert_eq!(m.select_task(id).await.unwrap(), Some(t));
}

#[tokio::test]
async fn edit_task_changes_only_provided_fields() {
  let (m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let s = subject(&m, "Química").await;
  let input = NewTask::new("Informe", Priority::Low, in_days(4), s.subject_id)
    .with_description("Primer borrador");
  let original = m.create_task(input).await.unwrap();
  m.mark_task(original.task_id).await.unwrap();

  let edited = m
    .edit_task(original.task_id, TaskUpdate {
      title: Some("Informe final".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(edited.title, "Informe final");
  assert_eq!(edited.description, original.description);
  assert_eq!(edited.priority, original.priority);
  assert_eq!(edited.due_date, original.due_date);
  assert_eq!(edited.subject_id, original.subject_id);
  assert_eq!(edited.status, TaskStatus::Completed);
}

#[tokio::test]
async fn edit_task_validates_before_touching_storage() {
  let (m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let s = subject(&m, "Química").await;
  let t = task(&m, &s, "Informe").await;

  let yesterday = today().pred_opt().unwrap();
  let err = m
    .edit_task(t.task_id, TaskUpdate { due_date: Some(yesterday), ..Default::default() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidDate(_)));

  let err = m
    .edit_task(t.task_id, TaskUpdate { title: Some(" ".into()), ..Default::default() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidTitle(_)));

  assert_eq!(m.select_task(t.task_id).await.unwrap(), Some(t));
}

#[tokio::test]
async fn edit_task_moves_only_between_own_subjects() {
  let (mut m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let anas = subject(&m, "Historia").await;
  switch_to(&mut m, "Luis Gómez", "luis@mail.com").await;
  let chem = subject(&m, "Química").await;
  let bio = subject(&m, "Biología").await;
  let t = task(&m, &chem, "Informe").await;

  let err = m
    .edit_task(t.task_id, TaskUpdate {
      subject_id: Some(anas.subject_id),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotOwned(Resource::Subject(_))));

  let moved = m
    .edit_task(t.task_id, TaskUpdate {
      subject_id: Some(bio.subject_id),
      priority: Some(Priority::High),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(moved.subject_id, bio.subject_id);
  assert_eq!(moved.priority, Priority::High);
  assert!(m.list_tasks(chem.subject_id).await.unwrap().is_empty());
  assert_eq!(m.list_tasks(bio.subject_id).await.unwrap(), vec![moved]);
}

#[tokio::test]
async fn delete_task_removes_only_that_task() {
  let (m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let s = subject(&m, "Química").await;
  let keep = task(&m, &s, "Conservar").await;
  let discard = task(&m, &s, "Descartar").await;

  m.delete_task(discard.task_id).await.unwrap();
  assert_eq!(m.list_tasks(s.subject_id).await.unwrap(), vec![keep]);
}

#[tokio::test]
async fn list_tasks_is_ordered_by_due_date() {
  let (m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let s = subject(&m, "Química").await;
  for (title, days) in [("Tarde", 20), ("Pronto", 1), ("Medio", 10)] {
    m.create_task(NewTask::new(title, Priority::Low, in_days(days), s.subject_id))
      .await
      .unwrap();
  }

  let titles: Vec<_> = m
    .list_tasks(s.subject_id)
    .await
    .unwrap()
    .into_iter()
    .map(|t| t.title)
    .collect();
  assert_eq!(titles, ["Pronto", "Medio", "Tarde"]);
}

#[tokio::test]
async fn list_all_tasks_spans_own_subjects_and_filters_by_status() {
  let (mut m, _ana) = signed_in("Ana Torres", "ana@mail.com").await;
  let anas = subject(&m, "Historia").await;
  task(&m, &anas, "Ajena").await;

  switch_to(&mut m, "Luis Gómez", "luis@mail.com").await;
  let chem = subject(&m, "Química").await;
  let bio = subject(&m, "Biología").await;
  m.create_task(NewTask::new("Informe", Priority::Low, in_days(5), chem.subject_id))
    .await
    .unwrap();
  let essay = m
    .create_task(NewTask::new("Ensayo", Priority::High, in_days(2), bio.subject_id))
    .await
    .unwrap();
  m.mark_task(essay.task_id).await.unwrap();

  let titles = |tasks: Vec<taskmaster_core::task::Task>| {
    tasks.into_iter().map(|t| t.title).collect::<Vec<_>>()
  };
  assert_eq!(titles(m.list_all_tasks(None).await.unwrap()), ["Ensayo", "Informe"]);

  let pending = "pendiente".parse::<TaskStatus>().unwrap();
  assert_eq!(titles(m.list_all_tasks(Some(pending)).await.unwrap()), ["Informe"]);
  assert_eq!(
    titles(m.list_all_tasks(Some(TaskStatus::Completed)).await.unwrap()),
    ["Ensayo"]
  );
}

#[tokio::test]
async fn list_all_tasks_requires_an_active_user() {
  let m = manager().await;
  let err = m.list_all_tasks(None).await.unwrap_err();
  assert!(matches!(err, Error::NoActiveUser));
}
